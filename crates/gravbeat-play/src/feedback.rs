use serde::{Deserialize, Serialize};

use crate::judge::Judgment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// The judgment label currently on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feedback {
    pub judgment: Judgment,
    pub shown_at_us: i64,
    pub expires_at_us: i64,
}

impl Feedback {
    pub fn label(&self) -> &'static str {
        self.judgment.label()
    }

    pub fn color(&self) -> Rgb {
        self.judgment.color()
    }
}

/// Holds the most recent judgment for a fixed display time.
#[derive(Debug, Clone)]
pub struct FeedbackState {
    duration_us: i64,
    current: Option<Feedback>,
}

impl FeedbackState {
    pub fn new(duration_us: i64) -> Self {
        Self {
            duration_us,
            current: None,
        }
    }

    pub fn show(&mut self, judgment: Judgment, now_us: i64) {
        self.current = Some(Feedback {
            judgment,
            shown_at_us: now_us,
            expires_at_us: now_us + self.duration_us,
        });
    }

    /// The feedback still visible at `now_us`.
    pub fn active(&self, now_us: i64) -> Option<&Feedback> {
        self.current.as_ref().filter(|f| now_us < f.expires_at_us)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
