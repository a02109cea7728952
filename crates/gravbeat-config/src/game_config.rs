use std::path::Path;

use anyhow::{Context, Result};
use gravbeat_types::{LANE_COUNT, Lane};
use serde::{Deserialize, Serialize};

/// Play-field geometry in screen pixels (y grows downward).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
    /// Left edge of each lane's sprites, in field order.
    pub lane_x: [f32; LANE_COUNT],
    /// Distance from the field edge to the hit-zone line.
    pub zone_edge_distance: f32,
    pub sprite_width: f32,
    pub sprite_height: f32,
    pub hitbox_scale: f32,
    /// How far outside the field notes spawn and are culled.
    pub offscreen_margin: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: 1600.0,
            height: 900.0,
            lane_x: [270.0, 540.0, 810.0, 1080.0],
            zone_edge_distance: 150.0,
            sprite_width: 250.0,
            sprite_height: 150.0,
            hitbox_scale: 0.8,
            offscreen_margin: 100.0,
        }
    }
}

impl FieldConfig {
    pub fn lane_x(&self, lane: Lane) -> f32 {
        self.lane_x[lane.index()]
    }

    /// Top of the hit zones while notes travel down.
    pub fn forward_zone_y(&self) -> f32 {
        self.height - self.zone_edge_distance
    }

    /// Top of the hit zones while notes travel up.
    pub fn reversed_zone_y(&self) -> f32 {
        self.zone_edge_distance - self.sprite_height
    }
}

/// Hit-classification windows (pixels of center distance) and base scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeWindows {
    pub perfect_px: f32,
    pub good_px: f32,
    pub late_px: f32,
    pub perfect_score: u32,
    pub good_score: u32,
    pub late_score: u32,
}

impl Default for JudgeWindows {
    fn default() -> Self {
        Self {
            perfect_px: 20.0,
            good_px: 65.0,
            late_px: 100.0,
            perfect_score: 100,
            good_score: 50,
            late_score: 25,
        }
    }
}

/// Time constants, all in microseconds unless named otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub tick_rate_hz: u32,
    pub spawn_window_us: i64,
    pub key_cooldown_us: i64,
    /// Pixels per tick. 850 px over 1.5 s at 60 Hz.
    pub note_speed: f32,
    pub feedback_us: i64,
    pub music_start_us: i64,
    pub video_start_us: i64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            spawn_window_us: 1_550_000,
            key_cooldown_us: 50_000,
            note_speed: 9.44,
            feedback_us: 500_000,
            music_start_us: 5_000_000,
            video_start_us: 4_400_000,
        }
    }
}

impl TimingConfig {
    pub fn tick_us(&self) -> i64 {
        1_000_000 / i64::from(self.tick_rate_hz.max(1))
    }
}

/// Gravity-flip scheduling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    pub min_interval_us: i64,
    pub max_interval_us: i64,
    pub countdown_us: i64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            min_interval_us: 15_000_000,
            max_interval_us: 30_000_000,
            countdown_us: 5_000_000,
        }
    }
}

/// Procedural ("pattern") track generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    pub min_gap_us: i64,
    pub max_gap_us: i64,
    pub window_us: i64,
    /// Endless play generates another window once less than this remains.
    pub refill_threshold_us: i64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            min_gap_us: 500_000,
            max_gap_us: 1_500_000,
            window_us: 300_000_000,
            refill_threshold_us: 30_000_000,
        }
    }
}

/// Game-wide tunables (gravbeat.json).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field: FieldConfig,
    pub judge: JudgeWindows,
    pub timing: TimingConfig,
    pub gravity: GravityConfig,
    pub pattern: PatternConfig,
}

impl GameConfig {
    /// Clamp values into ranges the play core can run with.
    pub fn validate(&mut self) {
        let field = &mut self.field;
        field.width = field.width.max(1.0);
        field.height = field.height.max(1.0);
        field.sprite_width = field.sprite_width.max(1.0);
        field.sprite_height = field.sprite_height.max(1.0);
        field.hitbox_scale = field.hitbox_scale.clamp(0.1, 1.0);
        field.offscreen_margin = field.offscreen_margin.max(0.0);

        let judge = &mut self.judge;
        judge.perfect_px = judge.perfect_px.max(0.0);
        judge.good_px = judge.good_px.max(judge.perfect_px);
        judge.late_px = judge.late_px.max(judge.good_px);

        let timing = &mut self.timing;
        timing.tick_rate_hz = timing.tick_rate_hz.clamp(1, 1000);
        timing.spawn_window_us = timing.spawn_window_us.max(0);
        timing.key_cooldown_us = timing.key_cooldown_us.max(0);
        if timing.note_speed.is_nan() || timing.note_speed <= 0.0 {
            timing.note_speed = TimingConfig::default().note_speed;
        }
        timing.feedback_us = timing.feedback_us.max(0);

        let gravity = &mut self.gravity;
        gravity.min_interval_us = gravity.min_interval_us.max(1);
        gravity.max_interval_us = gravity.max_interval_us.max(gravity.min_interval_us);
        gravity.countdown_us = gravity.countdown_us.max(0);

        let pattern = &mut self.pattern;
        pattern.min_gap_us = pattern.min_gap_us.max(1);
        pattern.max_gap_us = pattern.max_gap_us.max(pattern.min_gap_us);
        pattern.window_us = pattern.window_us.max(pattern.max_gap_us);
        pattern.refill_threshold_us = pattern.refill_threshold_us.max(0);
    }

    /// Read config from a JSON file. Missing keys take their defaults.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let mut config: GameConfig = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        config.validate();
        Ok(config)
    }

    /// Read config, or fall back to defaults when the file does not exist.
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::read(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_anchors() {
        let field = FieldConfig::default();
        assert_eq!(field.forward_zone_y(), 750.0);
        assert_eq!(field.reversed_zone_y(), 0.0);
        assert_eq!(field.lane_x(Lane::Up), 810.0);
    }

    #[test]
    fn tick_duration() {
        assert_eq!(TimingConfig::default().tick_us(), 16_666);
    }

    #[test]
    fn deserialize_from_empty() {
        let config: GameConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{"judge":{"perfect_px":10.0}}"#).unwrap();
        assert_eq!(config.judge.perfect_px, 10.0);
        assert_eq!(config.judge.good_px, 65.0);
        assert_eq!(config.timing.spawn_window_us, 1_550_000);
    }

    #[test]
    fn validate_orders_windows_and_ranges() {
        let mut config = GameConfig::default();
        config.judge.good_px = 5.0;
        config.judge.late_px = 1.0;
        config.gravity.max_interval_us = 1;
        config.timing.note_speed = -3.0;
        config.timing.tick_rate_hz = 0;
        config.validate();

        assert_eq!(config.judge.good_px, 20.0);
        assert_eq!(config.judge.late_px, 20.0);
        assert_eq!(config.gravity.max_interval_us, config.gravity.min_interval_us);
        assert_eq!(config.timing.note_speed, 9.44);
        assert_eq!(config.timing.tick_rate_hz, 1);
    }
}
