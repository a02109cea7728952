use gravbeat_config::{SessionConfig, SongCatalog, SongPaths};
use gravbeat_timeline::{Timeline, load_csv_or_empty};
use log::error;

/// Where a session's spawn timing comes from.
#[derive(Debug, Clone)]
pub enum Track {
    /// A recorded key log.
    Fixed(Timeline),
    /// Generated timing with lanes drawn from the difficulty's pattern pool.
    Procedural,
}

impl Track {
    /// Resolve the track for `session` against the song catalog. Unknown
    /// songs and unreadable key logs produce an empty fixed track.
    pub fn resolve(session: &SessionConfig, catalog: &SongCatalog) -> Self {
        if session.is_pattern() {
            return Track::Procedural;
        }
        match catalog.paths(&session.song_id) {
            Some(SongPaths { key_log, .. }) => Track::Fixed(load_csv_or_empty(&key_log)),
            None => {
                error!("Unknown song '{}'", session.song_id);
                Track::Fixed(Timeline::new())
            }
        }
    }

    pub fn is_procedural(&self) -> bool {
        matches!(self, Track::Procedural)
    }
}
