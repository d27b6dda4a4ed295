// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic hash-derived embedding strategy.
//!
//! Spreads SHA-256 digest bits across the configured dimension and
//! L2-normalizes the result. Explicitly a placeholder with no semantic
//! meaning; it exists so the system runs local-first with no model
//! dependency, and so re-embedding identical text is idempotent.

use async_trait::async_trait;
use engram_core::{EmbeddingStrategy, EngramError};
use sha2::{Digest, Sha256};

/// Default embedding dimension when none is configured.
pub const DEFAULT_DIMENSION: usize = 1536;

/// Substituted for empty input so embedding never fails on it.
const EMPTY_SENTINEL: &str = "empty";

/// Hash-based pseudo-embedder.
#[derive(Debug, Clone, Copy)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim: if dim == 0 { DEFAULT_DIMENSION } else { dim },
        }
    }
}

#[async_trait]
impl EmbeddingStrategy for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dim
    }

    async fn embed_text(&self, text: &str) -> Result<Vec<f32>, EngramError> {
        let text = if text.is_empty() { EMPTY_SENTINEL } else { text };
        let digest = Sha256::digest(text.as_bytes());

        let mut vec = Vec::with_capacity(self.dim);
        for i in 0..self.dim {
            // Spread hash bits across dimensions.
            let off = i % 16;
            let chunk = u16::from_le_bytes([digest[off], digest[off + 1]]);
            vec.push(f32::from(chunk % 1000) / 1000.0);
        }
        Ok(l2_normalize(&vec))
    }
}

/// L2-normalize a vector. A zero vector is returned unchanged.
fn l2_normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vec.iter().map(|v| v / norm).collect()
    } else {
        vec.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn identical_text_embeds_bit_identically() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed_text("the same words").await.unwrap();
        let b = embedder.embed_text("the same words").await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn different_text_embeds_differently() {
        let embedder = HashEmbedder::new(64);
        let a = embedder.embed_text("one thing").await.unwrap();
        let b = embedder.embed_text("another thing").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn output_has_configured_dimension() {
        let embedder = HashEmbedder::new(384);
        let vec = embedder.embed_text("dimension check").await.unwrap();
        assert_eq!(vec.len(), 384);
        assert_eq!(embedder.dimension(), 384);
    }

    #[tokio::test]
    async fn output_is_unit_normalized() {
        let embedder = HashEmbedder::new(256);
        let vec = embedder.embed_text("normalize me").await.unwrap();
        let norm: f32 = vec.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-3, "norm was {norm}");
    }

    #[tokio::test]
    async fn empty_text_uses_sentinel_instead_of_failing() {
        let embedder = HashEmbedder::new(32);
        let empty = embedder.embed_text("").await.unwrap();
        let sentinel = embedder.embed_text("empty").await.unwrap();
        assert_eq!(empty, sentinel);
    }

    #[tokio::test]
    async fn zero_dimension_falls_back_to_default() {
        let embedder = HashEmbedder::new(0);
        assert_eq!(embedder.dimension(), DEFAULT_DIMENSION);
    }

    #[test]
    fn l2_normalize_general_vector() {
        let n = l2_normalize(&[3.0, 4.0]);
        assert!((n[0] - 0.6).abs() < 0.001);
        assert!((n[1] - 0.8).abs() < 0.001);
    }

    #[test]
    fn l2_normalize_zero_vector_unchanged() {
        assert_eq!(l2_normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
    }
}
