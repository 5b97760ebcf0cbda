//! Entry and Page Types
//!
//! Wire format shared by the HTTP API and the storage file. Field names are
//! the compatibility surface with the existing browser client — do not rename
//! without migrating stored files and the page that reads them.

use serde::{Deserialize, Serialize};

/// One player's score record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player name as submitted.
    pub name: String,

    /// Numeric score. Integer end to end — no precision loss through JSON.
    pub score: i64,

    /// Client-supplied time string. Opaque: never parsed as a timestamp.
    pub time: String,

    /// 1-based position in the board, recomputed after every mutation.
    /// Ignored on input.
    #[serde(default)]
    pub rank: u32,
}

impl ScoreEntry {
    /// Create an unranked entry.
    pub fn new(name: impl Into<String>, score: i64, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score,
            time: time.into(),
            rank: 0,
        }
    }

    /// Whether `other` is the same submission: identical name, score and
    /// time. Rank is derived state and does not participate.
    pub fn same_submission(&self, other: &ScoreEntry) -> bool {
        self.name == other.name && self.score == other.score && self.time == other.time
    }
}

/// One page of the board plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScorePage {
    /// Entries on this page, at most [`crate::SCORES_PER_PAGE`].
    pub scores: Vec<ScoreEntry>,

    /// Total number of pages; 0 when the board is empty.
    pub total_pages: u32,

    /// The page that was served (after lower-clamping, never upper-clamped).
    pub current_page: u32,
}
