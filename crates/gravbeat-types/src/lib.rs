// Shared vocabulary for the gravbeat crates: lanes, play options,
// field geometry and the session clock.

mod geometry;
mod lane;
mod mode;
mod time;

pub use geometry::{Rect, scaled_rect};
pub use lane::{LANE_COUNT, Lane, LaneSet};
pub use mode::{Difficulty, PlayMode, TravelDirection};
pub use time::{ManualClock, SessionClock, SystemClock, micros_to_secs, secs_to_micros};
