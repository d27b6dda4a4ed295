// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Graph port contract for durable fact storage and search.

use async_trait::async_trait;

use crate::error::EngramError;
use crate::types::Fact;

/// Durable triple storage with search over subjects and objects.
#[async_trait]
pub trait GraphPort: Send + Sync {
    /// Insert a fact, or update its confidence if the
    /// (subject, predicate, object) triple already exists.
    /// Returns the row identity.
    async fn upsert_fact(&self, fact: &Fact) -> Result<i64, EngramError>;

    /// Substring search over subject and object, most recent first.
    /// A limit of zero or below falls back to 5.
    async fn search_facts(&self, term: &str, limit: i64) -> Result<Vec<Fact>, EngramError>;

    /// Facts whose subject or object equals `entity`, ordered by
    /// confidence descending then recency descending.
    async fn neighbors(&self, entity: &str, limit: i64) -> Result<Vec<Fact>, EngramError>;
}
