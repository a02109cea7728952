//! Song catalog (songs.json).
//!
//! ```json
//! {
//!   "song1": {
//!     "title": "First Song",
//!     "artist": "Someone",
//!     "key_log_file": "logs/song1.csv",
//!     "music_file": "music/song1.mp3",
//!     "video_file": "vids/song1.mp4"
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongEntry {
    pub title: String,
    pub artist: String,
    pub key_log_file: String,
    pub music_file: Option<String>,
    pub video_file: Option<String>,
}

/// A song's files with relative paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongPaths {
    pub key_log: PathBuf,
    pub music: Option<PathBuf>,
    pub video: Option<PathBuf>,
}

#[derive(Debug, Clone, Default)]
pub struct SongCatalog {
    /// Relative paths in entries resolve against this directory.
    base_dir: PathBuf,
    songs: BTreeMap<String, SongEntry>,
}

impl SongCatalog {
    pub fn new(base_dir: impl Into<PathBuf>, songs: BTreeMap<String, SongEntry>) -> Self {
        Self {
            base_dir: base_dir.into(),
            songs,
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read song catalog: {}", path.display()))?;
        let songs: BTreeMap<String, SongEntry> = serde_json::from_str(&data)
            .with_context(|| format!("failed to parse song catalog: {}", path.display()))?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        info!("Loaded {} songs from {}", songs.len(), path.display());
        Ok(Self { base_dir, songs })
    }

    pub fn get(&self, id: &str) -> Option<&SongEntry> {
        self.songs.get(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.songs.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    pub fn paths(&self, id: &str) -> Option<SongPaths> {
        let entry = self.get(id)?;
        Some(SongPaths {
            key_log: self.resolve(&entry.key_log_file),
            music: entry.music_file.as_deref().map(|f| self.resolve(f)),
            video: entry.video_file.as_deref().map(|f| self.resolve(f)),
        })
    }

    fn resolve(&self, file: &str) -> PathBuf {
        let path = Path::new(file);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
