// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Router,
    routing::{get, post},
};
use engram_core::EngramError;
use engram_engine::MemoryEngine;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The memory engine; the gateway's only collaborator.
    pub engine: Arc<MemoryEngine>,
    /// Process start time for uptime reporting.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(engine: Arc<MemoryEngine>) -> Self {
        Self {
            engine,
            start_time: Instant::now(),
        }
    }
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the router. Exposed separately from [`start_server`] so tests
/// can drive it without a listener.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route("/v1/observe", post(handlers::post_observe))
        .route("/v1/recall", get(handlers::get_recall))
        .route("/v1/consolidate", post(handlers::post_consolidate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the gateway HTTP server, shutting down gracefully when the
/// token is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    cancel: CancellationToken,
) -> Result<(), EngramError> {
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| EngramError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { cancel.cancelled().await })
        .await
        .map_err(|e| EngramError::Internal(format!("gateway server error: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::Duration;
    use engram_core::SystemClock;
    use engram_engine::{HashEmbedder, HeuristicDistiller, SensoryBuffer};
    use engram_storage::{Database, SqliteGraphStore, SqliteLogStore, VectorStore};
    use tower::ServiceExt;

    use super::*;

    async fn test_state() -> GatewayState {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let engine = MemoryEngine::new(
            SensoryBuffer::new(128, Duration::seconds(1800), Arc::new(SystemClock)),
            Arc::new(HeuristicDistiller),
            Arc::new(HashEmbedder::new(32)),
            Arc::new(SqliteLogStore::new(db.clone())),
            Arc::new(SqliteGraphStore::new(db.clone())),
            Arc::new(VectorStore::new(db, false, 32)),
        );
        GatewayState::new(Arc::new(engine))
    }

    fn json_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = router(test_state().await);
        let res = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn observe_then_consolidate_then_recall() {
        let app = router(test_state().await);

        let res = app
            .clone()
            .oneshot(json_post(
                "/v1/observe",
                r#"{"content": "Alice likes vectors",
                    "metadata": {"subject": "Alice", "predicate": "likes", "object": "vectors"}}"#,
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NO_CONTENT);

        let res = app
            .clone()
            .oneshot(json_post("/v1/consolidate", "{}"))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["facts"], 1);

        let res = app
            .oneshot(
                Request::builder()
                    .uri("/v1/recall?q=Alice&k=5")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["related_logs"].as_array().unwrap().len(), 0);
        let facts = json["related_facts"].as_array().unwrap();
        assert_eq!(facts.len(), 1);
        assert_eq!(facts[0]["subject"], "Alice");
        assert_eq!(facts[0]["confidence"], 0.9);
    }

    #[tokio::test]
    async fn observe_with_empty_content_is_bad_request() {
        let app = router(test_state().await);
        let res = app
            .oneshot(json_post("/v1/observe", r#"{"content": ""}"#))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(
            json["error"]
                .as_str()
                .unwrap()
                .contains("content must not be empty")
        );
    }

    #[tokio::test]
    async fn consolidate_on_empty_buffer_commits_nothing() {
        let app = router(test_state().await);
        let res = app.oneshot(json_post("/v1/consolidate", "{}")).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["facts"], 0);
    }
}
