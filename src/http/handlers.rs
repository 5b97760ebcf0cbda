//! Request Handlers
//!
//! One handler per route. Submission bodies are decoded by hand from a raw
//! JSON value so every structurally invalid body maps to 400, and board
//! errors map onto the status codes the browser client already expects:
//! 409 for duplicates, 500 for persistence failures.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::board::entry::ScoreEntry;
use crate::board::state::{BoardError, ScoreBoard};

/// Query parameters accepted by [`get_scores`].
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Requested page. Anything that does not parse as a positive integer
    /// behaves as page 1.
    pub page: Option<String>,
}

/// `POST /api/scores` — submit a score.
///
/// Responds 201 with the stored entry (including its assigned rank), 400 on
/// a body that does not decode to an entry, 409 on a duplicate submission,
/// 500 when the snapshot write fails.
pub async fn submit_score(
    State(board): State<Arc<ScoreBoard>>,
    Json(payload): Json<Value>,
) -> Response {
    let candidate: ScoreEntry = match serde_json::from_value(payload) {
        Ok(entry) => entry,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": format!("invalid score entry: {e}") })),
            )
                .into_response();
        }
    };

    match board.submit(candidate).await {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(BoardError::Duplicate) => (
            StatusCode::CONFLICT,
            Json(json!({ "error": "duplicate score entry" })),
        )
            .into_response(),
        Err(BoardError::Persist(e)) => {
            error!(error = %e, "score submission could not be persisted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "failed to save scores" })),
            )
                .into_response()
        }
    }
}

/// `GET /api/scores?page=N` — read one page of the board.
///
/// A missing, zero or unparseable page behaves as page 1. Pages past the end
/// return an empty list with the true page count.
pub async fn get_scores(
    State(board): State<Arc<ScoreBoard>>,
    Query(params): Query<ListParams>,
) -> Response {
    let page = params
        .page
        .as_deref()
        .and_then(|p| p.parse::<u32>().ok())
        .map_or(1, |p| p.max(1));

    Json(board.list(page).await).into_response()
}

/// `GET /health` — liveness plus the current entry count.
pub async fn health(State(board): State<Arc<ScoreBoard>>) -> Response {
    Json(json!({
        "status": "ok",
        "entries": board.len().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
    .into_response()
}
