use gravbeat_types::{Difficulty, PlayMode};
use serde::{Deserialize, Serialize};

/// Song id that selects the procedural track instead of a catalog song.
pub const PATTERN_SONG_ID: &str = "pattern";

/// Parameters for one play session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub song_id: String,
    pub difficulty: Difficulty,
    pub mode: PlayMode,
    /// Fixed RNG seed for reproducible runs. Entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            song_id: PATTERN_SONG_ID.to_string(),
            difficulty: Difficulty::default(),
            mode: PlayMode::default(),
            seed: None,
        }
    }
}

impl SessionConfig {
    pub fn new(song_id: impl Into<String>, difficulty: Difficulty, mode: PlayMode) -> Self {
        Self {
            song_id: song_id.into(),
            difficulty,
            mode,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_pattern(&self) -> bool {
        self.song_id == PATTERN_SONG_ID
    }

    pub fn gravity_enabled(&self) -> bool {
        self.difficulty.has_gravity_flips()
    }

    /// Fixed tracks on hard get their lanes shuffled.
    pub fn shuffles_track(&self) -> bool {
        !self.is_pattern() && self.difficulty.shuffles_fixed_track()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routing() {
        let pattern = SessionConfig::new("pattern", Difficulty::Hard, PlayMode::Endless);
        assert!(pattern.is_pattern());
        assert!(pattern.gravity_enabled());
        assert!(!pattern.shuffles_track());

        let song = SessionConfig::new("song1", Difficulty::Hard, PlayMode::Normal);
        assert!(song.shuffles_track());

        let easy = SessionConfig::new("song1", Difficulty::Easy, PlayMode::Normal);
        assert!(!easy.gravity_enabled());
        assert!(!easy.shuffles_track());
    }

    #[test]
    fn deserializes_lowercase_names() {
        let config: SessionConfig = serde_json::from_str(
            r#"{"song_id":"song2","difficulty":"medium","mode":"endless","seed":5}"#,
        )
        .unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.mode, PlayMode::Endless);
        assert_eq!(config.seed, Some(5));
    }
}
