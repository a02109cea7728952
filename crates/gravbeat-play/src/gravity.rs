//! Gravity flips: every 15-30 s the travel direction reverses, after a
//! visible 5 s countdown.

use gravbeat_config::GravityConfig;
use gravbeat_types::TravelDirection;
use log::info;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeEvent {
    CountdownStarted,
    Flipped(TravelDirection),
}

#[derive(Debug, Clone)]
pub struct ModeController {
    config: GravityConfig,
    enabled: bool,
    direction: TravelDirection,
    next_switch_us: i64,
    countdown_start_us: Option<i64>,
}

impl ModeController {
    pub fn new(config: GravityConfig, enabled: bool) -> Self {
        Self {
            config,
            enabled,
            direction: TravelDirection::Forward,
            next_switch_us: i64::MAX,
            countdown_start_us: None,
        }
    }

    /// Schedule the first flip. No-op when disabled.
    pub fn start<R: Rng + ?Sized>(&mut self, now_us: i64, rng: &mut R) {
        if self.enabled {
            self.schedule(now_us, rng);
        }
    }

    fn schedule<R: Rng + ?Sized>(&mut self, now_us: i64, rng: &mut R) {
        let interval = rng.gen_range(self.config.min_interval_us..=self.config.max_interval_us);
        self.next_switch_us = now_us + interval;
    }

    pub fn tick<R: Rng + ?Sized>(&mut self, now_us: i64, rng: &mut R) -> Option<ModeEvent> {
        if !self.enabled {
            return None;
        }

        if let Some(start) = self.countdown_start_us {
            if now_us - start < self.config.countdown_us {
                return None;
            }
            self.direction = self.direction.flipped();
            self.countdown_start_us = None;
            self.schedule(now_us, rng);
            info!("Gravity flipped to {:?}", self.direction);
            return Some(ModeEvent::Flipped(self.direction));
        }

        if now_us >= self.next_switch_us {
            self.countdown_start_us = Some(now_us);
            return Some(ModeEvent::CountdownStarted);
        }
        None
    }

    pub fn direction(&self) -> TravelDirection {
        self.direction
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn next_switch_us(&self) -> Option<i64> {
        (self.enabled && self.countdown_start_us.is_none()).then_some(self.next_switch_us)
    }

    pub fn countdown_remaining_us(&self, now_us: i64) -> Option<i64> {
        let start = self.countdown_start_us?;
        Some((self.config.countdown_us - (now_us - start)).max(0))
    }

    /// Whole seconds shown on the countdown: 5, 4, 3, 2, 1.
    pub fn countdown_display_secs(&self, now_us: i64) -> Option<u32> {
        let remaining = self.countdown_remaining_us(now_us)?;
        (remaining > 0).then(|| ((remaining - 1) / 1_000_000) as u32 + 1)
    }
}
