use std::fmt;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Short feedback sound played on a judgment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundCue {
    Perfect,
    Good,
    Miss,
}

impl SoundCue {
    pub fn name(self) -> &'static str {
        match self {
            SoundCue::Perfect => "perfect",
            SoundCue::Good => "good",
            SoundCue::Miss => "miss",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Core-facing side of the cue path. Must never block the tick.
pub trait CueSink {
    fn fire(&self, cue: SoundCue);
}

/// Backend-facing side: actually makes the sound.
/// Implementations: a device backend in the host, LogCuePlayer (headless).
pub trait CuePlayer: Send {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Discards every cue.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCueSink;

impl CueSink for NullCueSink {
    fn fire(&self, _cue: SoundCue) {}
}

/// Keeps every fired cue in order. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct RecordingCueSink {
    cues: Arc<Mutex<Vec<SoundCue>>>,
}

impl RecordingCueSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cues(&self) -> Vec<SoundCue> {
        match self.cues.lock() {
            Ok(cues) => cues.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn take(&self) -> Vec<SoundCue> {
        match self.cues.lock() {
            Ok(mut cues) => std::mem::take(&mut *cues),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl CueSink for RecordingCueSink {
    fn fire(&self, cue: SoundCue) {
        match self.cues.lock() {
            Ok(mut cues) => cues.push(cue),
            Err(poisoned) => poisoned.into_inner().push(cue),
        }
    }
}

impl CuePlayer for RecordingCueSink {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        self.fire(cue);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_shares_buffer_between_clones() {
        let sink = RecordingCueSink::new();
        let other = sink.clone();
        sink.fire(SoundCue::Perfect);
        other.fire(SoundCue::Miss);
        assert_eq!(sink.cues(), vec![SoundCue::Perfect, SoundCue::Miss]);
        assert_eq!(other.take().len(), 2);
        assert!(sink.cues().is_empty());
    }

    #[test]
    fn cue_names() {
        assert_eq!(SoundCue::Good.to_string(), "good");
        assert_eq!(SoundCue::Perfect.name(), "perfect");
    }
}
