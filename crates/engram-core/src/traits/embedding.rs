// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedding strategy contract.

use async_trait::async_trait;

use crate::error::EngramError;

/// Maps text to a fixed-dimension vector for similarity search.
///
/// Implementations must be deterministic for identical text (so
/// re-embedding the same content is idempotent) and must produce a
/// unit-normalized vector, making dot products behave as cosine
/// similarity downstream. Empty text is substituted with a sentinel,
/// never an error.
#[async_trait]
pub trait EmbeddingStrategy: Send + Sync {
    /// The fixed output dimension of this strategy.
    fn dimension(&self) -> usize;

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EngramError>;
}
