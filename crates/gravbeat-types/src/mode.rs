use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Difficulty tier selected for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Medium and hard periodically flip the travel direction.
    pub fn has_gravity_flips(self) -> bool {
        matches!(self, Difficulty::Medium | Difficulty::Hard)
    }

    /// Hard fixed tracks get their lane assignments shuffled.
    pub fn shuffles_fixed_track(self) -> bool {
        self == Difficulty::Hard
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => bail!("unknown difficulty: {other}"),
        }
    }
}

/// Session mode. Endless sessions never finish on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    #[default]
    Normal,
    Endless,
}

impl FromStr for PlayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(PlayMode::Normal),
            "endless" => Ok(PlayMode::Endless),
            other => bail!("unknown play mode: {other}"),
        }
    }
}

/// Direction notes travel across the field.
///
/// `Forward` is the usual top-to-bottom scroll with hit zones at the bottom;
/// `Reversed` is gravity mode, notes rise toward hit zones at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelDirection {
    #[default]
    Forward,
    Reversed,
}

impl TravelDirection {
    /// Sign applied to the per-tick y delta (screen y grows downward).
    pub fn sign(self) -> f32 {
        match self {
            TravelDirection::Forward => 1.0,
            TravelDirection::Reversed => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            TravelDirection::Forward => TravelDirection::Reversed,
            TravelDirection::Reversed => TravelDirection::Forward,
        }
    }

    pub fn is_reversed(self) -> bool {
        self == TravelDirection::Reversed
    }
}
