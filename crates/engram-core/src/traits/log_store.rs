// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable observation log contract.

use async_trait::async_trait;

use crate::error::EngramError;
use crate::types::{LogRecord, Observation};

/// Append-only keyed storage for raw observations.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persist an observation and return its assigned id. Rejects
    /// empty content with a validation error.
    async fn insert(&self, observation: &Observation) -> Result<String, EngramError>;

    /// Fetch records by id, best-effort: missing ids are omitted and
    /// result order is unspecified.
    async fn fetch_many(&self, ids: &[String]) -> Result<Vec<LogRecord>, EngramError>;

    /// Latest records, newest first. A limit of zero or below falls
    /// back to 50.
    async fn recent(&self, limit: i64) -> Result<Vec<LogRecord>, EngramError>;
}
