//! # Scoreboard Server
//!
//! Leaderboard service: clients submit a player name, score and time string
//! over HTTP and read back a ranked, paginated list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SCOREBOARD SERVER                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  board/          - Score ranking core                        │
//! │  ├── entry.rs    - Entry and page wire/storage types         │
//! │  ├── state.rs    - Authoritative board: submit, rank, list   │
//! │  └── store.rs    - JSON snapshot file, atomic overwrite      │
//! │                                                              │
//! │  http/           - Request layer (thin plumbing)             │
//! │  ├── handlers.rs - Submit / list / health handlers           │
//! │  └── server.rs   - Router, CORS, bind and shutdown           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Ordering Guarantee
//!
//! The board is always sorted by descending score with `rank` equal to each
//! entry's 1-based position. Every mutation re-sorts (stable, so tied scores
//! keep their submission order), reassigns ranks, and synchronously writes
//! the whole snapshot to the backing file before the call returns.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod board;
pub mod http;

// Re-export commonly used types
pub use board::entry::{ScoreEntry, ScorePage};
pub use board::state::{BoardError, ScoreBoard};
pub use board::store::{ScoreStore, StoreError};
pub use http::server::{ApiServerError, ServerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Entries per leaderboard page
pub const SCORES_PER_PAGE: usize = 5;
