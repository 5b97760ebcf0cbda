//! Snapshot Storage
//!
//! Whole-collection persistence: the board is serialized as a pretty-printed
//! JSON array and the file is replaced in full on every save. Writes go to a
//! sibling temp file first and are renamed into place, so a crash mid-write
//! leaves the previous snapshot intact. No cross-process locking — a second
//! process sharing the file can race with this one.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::board::entry::ScoreEntry;

/// Snapshot storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage file exists but could not be read.
    #[error("failed to read score file: {0}")]
    Read(std::io::Error),

    /// Storage file exists but does not decode as a score array.
    #[error("score file is not a valid score array: {0}")]
    Parse(#[from] serde_json::Error),

    /// Writing or renaming the snapshot failed.
    #[error("failed to write score file: {0}")]
    Write(std::io::Error),
}

/// Handle to the JSON file backing the board.
#[derive(Debug, Clone)]
pub struct ScoreStore {
    /// Location of the snapshot file.
    path: PathBuf,
}

impl ScoreStore {
    /// Create a store backed by `path`. The file is not touched until the
    /// first [`load`](Self::load) or [`save`](Self::save).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full entry array from disk.
    ///
    /// An absent file is a fresh board and loads as empty. A file that exists
    /// but cannot be read or parsed is an error — callers abort startup
    /// rather than silently discarding a present leaderboard.
    pub fn load(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no score file found, starting empty");
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(StoreError::Read)?;
        let entries: Vec<ScoreEntry> = serde_json::from_str(&contents)?;

        info!(
            count = entries.len(),
            path = %self.path.display(),
            "loaded scores from disk"
        );

        Ok(entries)
    }

    /// Replace the snapshot on disk with `entries`.
    ///
    /// The array is written to `<path>.tmp` and renamed over the target, so
    /// the visible file always holds a complete snapshot.
    pub fn save(&self, entries: &[ScoreEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::Write)?;
        }

        let contents = serde_json::to_string_pretty(entries)?;

        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, contents).map_err(StoreError::Write)?;
        fs::rename(&tmp_path, &self.path).map_err(StoreError::Write)?;

        debug!(
            count = entries.len(),
            path = %self.path.display(),
            "saved scores to disk"
        );

        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}
