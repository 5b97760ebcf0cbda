//! Board State
//!
//! The authoritative score collection. One instance owns the sequence for the
//! process lifetime; the HTTP layer only ever sees it through a shared handle.
//!
//! Submission policy: append with duplicate rejection. A candidate matching an
//! existing entry on the full (name, score, time) triple is refused; anything
//! else is appended, the sequence is re-sorted descending by score (stable, so
//! tied scores keep submission order), ranks are reassigned 1-based, and the
//! whole snapshot is written to disk before the call returns.

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::board::entry::{ScoreEntry, ScorePage};
use crate::board::store::{ScoreStore, StoreError};
use crate::SCORES_PER_PAGE;

/// Board operation errors.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    /// Candidate matches an existing entry on name, score and time.
    #[error("duplicate score entry")]
    Duplicate,

    /// Snapshot write failed. The in-memory board has already advanced and is
    /// not rolled back, so memory runs ahead of disk until the next
    /// successful persist.
    #[error("failed to persist scores: {0}")]
    Persist(#[from] StoreError),
}

/// The authoritative, always-sorted score board.
///
/// Reads (`list`, `snapshot`, `len`) share the read half of the lock and run
/// concurrently; `submit` holds the write half across the duplicate check,
/// mutation, re-rank and file write, so snapshots reach disk in mutation
/// order.
pub struct ScoreBoard {
    /// Entries sorted descending by score, ranks equal to 1-based position.
    entries: RwLock<Vec<ScoreEntry>>,
    /// Backing snapshot file.
    store: ScoreStore,
}

impl ScoreBoard {
    /// Open a board backed by `store`, loading any existing snapshot.
    ///
    /// An absent file starts an empty board; the file stays uncreated until
    /// the first successful submit. A present but unreadable or malformed
    /// file is returned as an error so startup fails loudly instead of
    /// silently resetting the leaderboard.
    pub fn open(store: ScoreStore) -> Result<Self, StoreError> {
        let entries = store.load()?;
        Ok(Self {
            entries: RwLock::new(entries),
            store,
        })
    }

    /// Submit a score. Returns the stored entry with its assigned rank.
    ///
    /// The candidate's incoming `rank` is discarded. On a persist failure the
    /// entry is already in memory and stays there; the error is surfaced so
    /// the caller can report it.
    pub async fn submit(&self, candidate: ScoreEntry) -> Result<ScoreEntry, BoardError> {
        let mut entries = self.entries.write().await;

        if entries.iter().any(|e| e.same_submission(&candidate)) {
            debug!(name = %candidate.name, score = candidate.score, "duplicate submission rejected");
            return Err(BoardError::Duplicate);
        }

        entries.push(candidate.clone());
        resort_and_rank(&mut entries);

        if let Err(e) = self.store.save(&entries) {
            error!(error = %e, "failed to persist scores, memory is ahead of disk");
            return Err(e.into());
        }

        // Just inserted, so the lookup cannot miss.
        let stored = entries
            .iter()
            .find(|e| e.same_submission(&candidate))
            .cloned()
            .unwrap_or(candidate);

        info!(name = %stored.name, score = stored.score, rank = stored.rank, "score accepted");
        Ok(stored)
    }

    /// Read one page of the board.
    ///
    /// `page` is lower-clamped to 1 but never upper-clamped: a page past the
    /// end yields an empty list with the true `total_pages`. An empty board
    /// reports `total_pages` 0.
    pub async fn list(&self, page: u32) -> ScorePage {
        let entries = self.entries.read().await;

        let page = page.max(1);
        let total_pages = ((entries.len() + SCORES_PER_PAGE - 1) / SCORES_PER_PAGE) as u32;

        let start = (page as usize - 1).saturating_mul(SCORES_PER_PAGE);
        let scores = if start < entries.len() {
            let end = (start + SCORES_PER_PAGE).min(entries.len());
            entries[start..end].to_vec()
        } else {
            Vec::new()
        };

        ScorePage {
            scores,
            total_pages,
            current_page: page,
        }
    }

    /// Full copy of the board, top rank first.
    pub async fn snapshot(&self) -> Vec<ScoreEntry> {
        self.entries.read().await.clone()
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the board holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Sort descending by score and stamp ranks with the 1-based position.
///
/// The sort is stable: entries with equal scores keep their current relative
/// order, no secondary key is applied.
fn resort_and_rank(entries: &mut [ScoreEntry]) {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.rank = i as u32 + 1;
    }
}
