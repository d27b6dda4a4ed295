// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Distillation strategy contract.

use async_trait::async_trait;

use crate::error::EngramError;
use crate::types::{Fact, Observation};

/// Converts a batch of buffered observations into candidate facts.
///
/// Implementations must be pure relative to their inputs and must
/// tolerate an empty batch (returning an empty batch). A strategy may
/// fail the whole batch; partial per-item failure is not part of the
/// contract.
#[async_trait]
pub trait DistillStrategy: Send + Sync {
    async fn distill(&self, observations: &[Observation]) -> Result<Vec<Fact>, EngramError>;
}
