mod catalog;
mod game_config;
mod session_config;

pub use catalog::{SongCatalog, SongEntry, SongPaths};
pub use game_config::{FieldConfig, GameConfig, GravityConfig, JudgeWindows, PatternConfig, TimingConfig};
pub use session_config::{PATTERN_SONG_ID, SessionConfig};
