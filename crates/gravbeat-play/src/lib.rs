//! Timing and judgment engine.
//!
//! [`PlaySession`] owns every piece of mutable play state and advances it one
//! tick at a time: gravity check, note motion and pass-miss detection, then
//! spawning. Key presses are judged synchronously in the order received.

pub mod feedback;
pub mod gravity;
pub mod hit_zone;
pub mod judge;
pub mod note;
pub mod score;
pub mod session;
pub mod spawner;
pub mod track;

pub use feedback::{Feedback, FeedbackState, Rgb};
pub use gravity::{ModeController, ModeEvent};
pub use hit_zone::{HitZone, HitZones};
pub use judge::{JudgeConfig, JudgeConfigBuilder, JudgeSystem, Judgment, PressOutcome};
pub use note::{Note, NoteField, NoteId, StepOutcome};
pub use score::{ScoreManager, combo_multiplier};
pub use session::{
    FeedbackSnapshot, FinishReason, HudSnapshot, NoteStats, PlayResult, PlaySession, SessionEvent,
};
pub use spawner::{SpawnContext, SpawnEntry, Spawner, SpriteCatalog, UniformSprites};
pub use track::Track;
