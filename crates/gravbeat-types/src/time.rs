use std::time::Instant;

/// Elapsed-time source for a play session.
///
/// All core components read time through this trait so that pausing and
/// tests control time in one place. Times are integer microseconds since the
/// session started, excluding time spent paused.
/// Implementations: SystemClock (play), ManualClock (tests, headless runs).
pub trait SessionClock {
    fn elapsed_us(&self) -> i64;

    /// Freezes elapsed time. No-op when already paused.
    fn pause(&mut self);

    /// Continues from the frozen elapsed time. No-op when running.
    fn resume(&mut self);

    fn is_paused(&self) -> bool;
}

pub fn secs_to_micros(secs: f64) -> i64 {
    (secs * 1_000_000.0).round() as i64
}

pub fn micros_to_secs(us: i64) -> f64 {
    us as f64 / 1_000_000.0
}

/// Wall-clock session time backed by `std::time::Instant`.
pub struct SystemClock {
    accumulated_us: i64,
    running_since: Option<Instant>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            accumulated_us: 0,
            running_since: Some(Instant::now()),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionClock for SystemClock {
    fn elapsed_us(&self) -> i64 {
        let running = self
            .running_since
            .map(|since| since.elapsed().as_micros() as i64)
            .unwrap_or(0);
        self.accumulated_us + running
    }

    fn pause(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.accumulated_us += since.elapsed().as_micros() as i64;
        }
    }

    fn resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    fn is_paused(&self) -> bool {
        self.running_since.is_none()
    }
}

/// Manually stepped clock for deterministic testing and simulation.
#[derive(Debug, Default)]
pub struct ManualClock {
    current_us: i64,
    paused: bool,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time(&mut self, us: i64) {
        self.current_us = us;
    }

    /// Moves time forward. Ignored while paused, like wall time that passes
    /// without counting toward the session.
    pub fn advance(&mut self, delta_us: i64) {
        if !self.paused {
            self.current_us += delta_us;
        }
    }
}

impl SessionClock for ManualClock {
    fn elapsed_us(&self) -> i64 {
        self.current_us
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
