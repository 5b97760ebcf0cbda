//! API Server
//!
//! Router assembly and server lifecycle. The board is shared with handlers
//! through an `Arc`; CORS is wide open because the API is consumed directly
//! from a static browser page with no server-side proxy.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::board::state::ScoreBoard;
use crate::http::handlers;

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address.
    pub bind_addr: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
        }
    }
}

/// API server errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiServerError {
    /// Failed to bind the listen address.
    #[error("failed to bind: {0}")]
    Bind(std::io::Error),

    /// The accept loop failed.
    #[error("server error: {0}")]
    Serve(std::io::Error),
}

/// Build the application router around a shared board handle.
///
/// Every response carries the permissive CORS headers (any origin, methods
/// POST/GET/OPTIONS, header Content-Type); preflight OPTIONS requests are
/// answered by the layer without reaching a handler.
pub fn router(board: Arc<ScoreBoard>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(
            "/api/scores",
            post(handlers::submit_score).get(handlers::get_scores),
        )
        .route("/health", get(handlers::health))
        .layer(cors)
        .with_state(board)
}

/// Run the server until shutdown is requested.
pub async fn run(config: ServerConfig, board: Arc<ScoreBoard>) -> Result<(), ApiServerError> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(ApiServerError::Bind)?;
    info!("scoreboard server listening on {}", config.bind_addr);

    axum::serve(listener, router(board))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ApiServerError::Serve)?;

    info!("server shutdown complete");
    Ok(())
}

/// Resolve when Ctrl+C (or SIGTERM on unix) is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => error!(error = %e, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::store::ScoreStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn test_router() -> (Router, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ScoreStore::new(dir.path().join("scores.json"));
        let board = Arc::new(ScoreBoard::open(store).unwrap());
        (router(board), dir)
    }

    fn submit_request(body: &str) -> Request<Body> {
        Request::builder()
            .uri("/api/scores")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_to_json(body: Body) -> Value {
        let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_server_config_default() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[tokio::test]
    async fn test_submit_then_list_through_router() {
        let (app, _dir) = test_router();

        let response = app
            .clone()
            .oneshot(submit_request(
                r#"{"name":"ada","score":1200,"time":"03:15"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let request = Request::builder()
            .uri("/api/scores?page=1")
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["totalPages"], 1);
        assert_eq!(body["scores"][0]["name"], "ada");
        assert_eq!(body["scores"][0]["rank"], 1);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (app, _dir) = test_router();

        let response = app.oneshot(submit_request("{not json")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preflight_is_answered_with_cors_headers() {
        let (app, _dir) = test_router();

        let request = Request::builder()
            .uri("/api/scores")
            .method("OPTIONS")
            .header("origin", "http://localhost:3000")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
        let allow_methods = response
            .headers()
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        assert!(allow_methods.contains("POST"));
        assert!(allow_methods.contains("GET"));
    }

    #[tokio::test]
    async fn test_simple_responses_carry_cors_headers() {
        let (app, _dir) = test_router();

        let request = Request::builder()
            .uri("/api/scores")
            .method("GET")
            .header("origin", "http://localhost:3000")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn test_health_route_registered() {
        let (app, _dir) = test_router();

        let request = Request::builder()
            .uri("/health")
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (app, _dir) = test_router();

        let request = Request::builder()
            .uri("/api/other")
            .method("GET")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
