// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the memory API.
//!
//! Handles POST /v1/observe, GET /v1/recall, POST /v1/consolidate, and
//! GET /health.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use engram_core::{EngramError, Metadata, Observation, RecalledContext};

use crate::server::GatewayState;

/// Source recorded when a caller omits one.
const DEFAULT_SOURCE: &str = "chat";

/// Request body for POST /v1/observe.
#[derive(Debug, Deserialize)]
pub struct ObserveRequest {
    /// The captured text.
    pub content: String,
    /// Originating channel; defaults to "chat".
    #[serde(default)]
    pub source: String,
    /// Optional structured hints (e.g. subject/predicate/object).
    #[serde(default)]
    pub metadata: Metadata,
}

/// Query parameters for GET /v1/recall.
#[derive(Debug, Deserialize)]
pub struct RecallParams {
    /// Search term.
    #[serde(default)]
    pub q: String,
    /// Result bound per modality; values at or below zero fall back to 5.
    #[serde(default)]
    pub k: i64,
}

/// Response body for POST /v1/consolidate.
#[derive(Debug, Serialize)]
pub struct ConsolidateResponse {
    /// Number of facts committed from this run.
    pub facts: usize,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// POST /v1/observe
///
/// Records one observation. Returns 204 on success.
pub async fn post_observe(
    State(state): State<GatewayState>,
    Json(body): Json<ObserveRequest>,
) -> Response {
    let observation = Observation {
        content: body.content,
        source: if body.source.is_empty() {
            DEFAULT_SOURCE.to_string()
        } else {
            body.source
        },
        metadata: body.metadata,
    };

    match state.engine.observe(observation).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /v1/recall?q=&k=
///
/// Returns the merged recall context for the query.
pub async fn get_recall(
    State(state): State<GatewayState>,
    Query(params): Query<RecallParams>,
) -> Response {
    match state.engine.recall(&params.q, params.k).await {
        Ok(ctx) => Json::<RecalledContext>(ctx).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /v1/consolidate
///
/// Manually triggers one consolidation run (the periodic task does the
/// same on its interval).
pub async fn post_consolidate(State(state): State<GatewayState>) -> Response {
    match state.engine.consolidate().await {
        Ok(facts) => Json(ConsolidateResponse { facts }).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /health
///
/// Unauthenticated liveness probe.
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

fn error_response(err: EngramError) -> Response {
    let status = match &err {
        EngramError::Validation(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
