// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector port contract for nearest-neighbor search.

use async_trait::async_trait;

use crate::error::EngramError;

/// Opaque nearest-neighbor index keyed by log id.
///
/// A disabled port is a valid degraded mode, not an error: upserts
/// become no-ops and searches return nothing. Callers check
/// [`enabled`](VectorPort::enabled) before paying for an embedding.
#[async_trait]
pub trait VectorPort: Send + Sync {
    fn enabled(&self) -> bool;

    /// Store an embedding linked to a log record. Fails on dimension
    /// mismatch or an empty vector.
    async fn upsert_embedding(&self, log_id: &str, embedding: &[f32])
        -> Result<(), EngramError>;

    /// Log ids ordered by similarity to `embedding`. Empty when the
    /// port is disabled. A `top_k` of zero or below falls back to 5.
    async fn search(&self, embedding: &[f32], top_k: i64) -> Result<Vec<String>, EngramError>;
}
