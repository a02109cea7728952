use gravbeat_audio::SoundCue;
use gravbeat_config::GameConfig;
use gravbeat_types::{LANE_COUNT, Lane, Rect, TravelDirection};
use serde::{Deserialize, Serialize};

use crate::feedback::Rgb;
use crate::hit_zone::HitZone;
use crate::note::{Note, NoteField, NoteId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Judgment {
    Perfect,
    Good,
    /// Inside the late window, past the zone center.
    Late,
    /// Inside the late window, short of the zone center.
    Early,
    Miss,
}

impl Judgment {
    pub fn is_miss(self) -> bool {
        self == Judgment::Miss
    }

    pub fn label(self) -> &'static str {
        match self {
            Judgment::Perfect => "Perfect",
            Judgment::Good => "Good",
            Judgment::Late => "Late",
            Judgment::Early => "Early",
            Judgment::Miss => "Miss",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Judgment::Perfect => Rgb(0, 255, 0),
            Judgment::Good => Rgb(255, 255, 0),
            Judgment::Late | Judgment::Early => Rgb(255, 0, 0),
            Judgment::Miss => Rgb(128, 128, 128),
        }
    }

    pub fn cue(self) -> SoundCue {
        match self {
            Judgment::Perfect => SoundCue::Perfect,
            Judgment::Good | Judgment::Late | Judgment::Early => SoundCue::Good,
            Judgment::Miss => SoundCue::Miss,
        }
    }
}

/// Classification windows in pixels of hitbox-center to zone-center
/// distance, plus the base score for each window.
#[derive(Debug, Clone, PartialEq)]
pub struct JudgeConfig {
    pub perfect_margin: f32,
    pub good_margin: f32,
    pub late_margin: f32,
    pub perfect_score: u32,
    pub good_score: u32,
    pub late_score: u32,
    pub hitbox_scale: f32,
    pub key_cooldown_us: i64,
}

impl JudgeConfig {
    pub fn normal() -> Self {
        Self {
            perfect_margin: 20.0,
            good_margin: 65.0,
            late_margin: 100.0,
            perfect_score: 100,
            good_score: 50,
            late_score: 25,
            hitbox_scale: 0.8,
            key_cooldown_us: 50_000,
        }
    }

    pub fn from_game_config(config: &GameConfig) -> Self {
        Self {
            perfect_margin: config.judge.perfect_px,
            good_margin: config.judge.good_px,
            late_margin: config.judge.late_px,
            perfect_score: config.judge.perfect_score,
            good_score: config.judge.good_score,
            late_score: config.judge.late_score,
            hitbox_scale: config.field.hitbox_scale,
            key_cooldown_us: config.timing.key_cooldown_us,
        }
    }

    pub fn builder() -> JudgeConfigBuilder {
        JudgeConfigBuilder::default()
    }

    pub fn base_score(&self, judgment: Judgment) -> u32 {
        match judgment {
            Judgment::Perfect => self.perfect_score,
            Judgment::Good => self.good_score,
            Judgment::Late | Judgment::Early => self.late_score,
            Judgment::Miss => 0,
        }
    }
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self::normal()
    }
}

#[derive(Debug, Default)]
pub struct JudgeConfigBuilder {
    perfect_margin: Option<f32>,
    good_margin: Option<f32>,
    late_margin: Option<f32>,
    hitbox_scale: Option<f32>,
    key_cooldown_us: Option<i64>,
}

impl JudgeConfigBuilder {
    pub fn perfect_margin(mut self, px: f32) -> Self {
        self.perfect_margin = Some(px);
        self
    }

    pub fn good_margin(mut self, px: f32) -> Self {
        self.good_margin = Some(px);
        self
    }

    pub fn late_margin(mut self, px: f32) -> Self {
        self.late_margin = Some(px);
        self
    }

    pub fn hitbox_scale(mut self, scale: f32) -> Self {
        self.hitbox_scale = Some(scale);
        self
    }

    pub fn key_cooldown_us(mut self, us: i64) -> Self {
        self.key_cooldown_us = Some(us);
        self
    }

    pub fn build(self) -> JudgeConfig {
        let default = JudgeConfig::normal();
        JudgeConfig {
            perfect_margin: self.perfect_margin.unwrap_or(default.perfect_margin),
            good_margin: self.good_margin.unwrap_or(default.good_margin),
            late_margin: self.late_margin.unwrap_or(default.late_margin),
            hitbox_scale: self.hitbox_scale.unwrap_or(default.hitbox_scale),
            key_cooldown_us: self.key_cooldown_us.unwrap_or(default.key_cooldown_us),
            ..default
        }
    }
}

/// Result of a press that got past the debounce.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PressOutcome {
    pub judgment: Judgment,
    /// The note consumed by a non-Miss judgment.
    pub note: Option<Note>,
}

pub struct JudgeSystem {
    config: JudgeConfig,
    last_press_us: [Option<i64>; LANE_COUNT],
}

impl JudgeSystem {
    pub fn new(config: JudgeConfig) -> Self {
        Self {
            config,
            last_press_us: [None; LANE_COUNT],
        }
    }

    pub fn config(&self) -> &JudgeConfig {
        &self.config
    }

    /// Per-lane debounce. Records the press time when accepted.
    pub fn accept_press(&mut self, lane: Lane, now_us: i64) -> bool {
        let slot = &mut self.last_press_us[lane.index()];
        if let Some(last) = *slot {
            if now_us - last < self.config.key_cooldown_us {
                return false;
            }
        }
        *slot = Some(now_us);
        true
    }

    /// Active note in `zone`'s lane whose hitbox center is vertically
    /// closest to the zone center.
    pub fn select_candidate<'a>(&self, notes: &'a NoteField, zone: &HitZone) -> Option<&'a Note> {
        let zone_cy = zone.rect.center_y();
        notes.in_lane(zone.lane).min_by(|a, b| {
            let da = (a.hitbox(self.config.hitbox_scale).center_y() - zone_cy).abs();
            let db = (b.hitbox(self.config.hitbox_scale).center_y() - zone_cy).abs();
            da.total_cmp(&db)
        })
    }

    /// Classify a hitbox against a zone rect.
    pub fn classify(&self, hitbox: &Rect, zone: &Rect, direction: TravelDirection) -> Judgment {
        if !hitbox.overlaps_horizontally(zone) || hitbox.vertical_overlap(zone) <= 0.0 {
            return Judgment::Miss;
        }

        let offset = hitbox.center_y() - zone.center_y();
        let distance = offset.abs();
        if distance <= self.config.perfect_margin {
            Judgment::Perfect
        } else if distance <= self.config.good_margin {
            Judgment::Good
        } else if hitbox.within_vertical_bounds(zone) && distance <= self.config.late_margin {
            let late = offset * direction.sign() > 0.0;
            if late { Judgment::Late } else { Judgment::Early }
        } else {
            Judgment::Miss
        }
    }

    /// Judge a key press. `None` when the press was debounced; otherwise the
    /// judgment, with the consumed note removed from `notes` on a hit.
    pub fn judge_press(
        &mut self,
        lane: Lane,
        now_us: i64,
        notes: &mut NoteField,
        zone: &HitZone,
        direction: TravelDirection,
    ) -> Option<PressOutcome> {
        if !self.accept_press(lane, now_us) {
            return None;
        }

        let Some(candidate) = self.select_candidate(notes, zone) else {
            return Some(PressOutcome {
                judgment: Judgment::Miss,
                note: None,
            });
        };

        let hitbox = candidate.hitbox(self.config.hitbox_scale);
        let judgment = self.classify(&hitbox, &zone.rect, direction);
        let id: NoteId = candidate.id;
        let note = if judgment.is_miss() {
            None
        } else {
            notes.remove(id)
        };
        Some(PressOutcome { judgment, note })
    }

    pub fn reset(&mut self) {
        self.last_press_us = [None; LANE_COUNT];
    }
}

impl Default for JudgeSystem {
    fn default() -> Self {
        Self::new(JudgeConfig::default())
    }
}
