//! Sound-cue plumbing between the play core and an audio backend.
//!
//! The core never touches an audio device. It fires [`SoundCue`]s into a
//! [`CueSink`]; the [`CueDispatcher`] forwards them over a bounded queue to a
//! [`CuePlayer`] running on its own thread.

mod cue;
mod dispatcher;

pub use cue::{CuePlayer, CueSink, NullCueSink, RecordingCueSink, SoundCue};
pub use dispatcher::{CUE_QUEUE_CAPACITY, CueDispatcher};
