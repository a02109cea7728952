// Song timelines: fixed key-log tracks, procedural timing for pattern mode,
// weighted lane pools and the hard-mode lane shuffle.

mod event;
mod loader;
mod pattern_pool;
mod procedural;
mod shuffle;

pub use event::{Timeline, TimelineEvent};
pub use loader::{load_csv, load_csv_from_reader, load_csv_or_empty, parse_key_list};
pub use pattern_pool::{PatternPool, PatternPools};
pub use procedural::{
    DEFAULT_MAX_GAP_US, DEFAULT_MIN_GAP_US, PROCEDURAL_WINDOW_US, ProceduralClock,
};
pub use shuffle::shuffle_lanes;
