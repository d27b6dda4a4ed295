// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementations of the log store and graph port contracts.
//!
//! Thin wrappers over the typed query modules, sharing one [`Database`]
//! handle so every write flows through the single background thread.

use std::sync::Arc;

use async_trait::async_trait;
use engram_core::{EngramError, Fact, GraphPort, LogRecord, LogStore, Observation};

use crate::database::Database;
use crate::queries;

/// SQLite-backed [`LogStore`].
pub struct SqliteLogStore {
    db: Arc<Database>,
}

impl SqliteLogStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LogStore for SqliteLogStore {
    async fn insert(&self, observation: &Observation) -> Result<String, EngramError> {
        queries::logs::insert_log(&self.db, observation).await
    }

    async fn fetch_many(&self, ids: &[String]) -> Result<Vec<LogRecord>, EngramError> {
        queries::logs::fetch_logs(&self.db, ids).await
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LogRecord>, EngramError> {
        queries::logs::recent_logs(&self.db, limit).await
    }
}

/// SQLite-backed [`GraphPort`].
pub struct SqliteGraphStore {
    db: Arc<Database>,
}

impl SqliteGraphStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GraphPort for SqliteGraphStore {
    async fn upsert_fact(&self, fact: &Fact) -> Result<i64, EngramError> {
        queries::facts::upsert_fact(&self.db, fact).await
    }

    async fn search_facts(&self, term: &str, limit: i64) -> Result<Vec<Fact>, EngramError> {
        queries::facts::search_facts(&self.db, term, limit).await
    }

    async fn neighbors(&self, entity: &str, limit: i64) -> Result<Vec<Fact>, EngramError> {
        queries::facts::neighbors(&self.db, entity, limit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn adapters_share_one_database() {
        let db = Arc::new(Database::open_in_memory().await.unwrap());
        let logs = SqliteLogStore::new(db.clone());
        let graph = SqliteGraphStore::new(db);

        let id = logs
            .insert(&Observation {
                content: "shared handle".to_string(),
                source: "test".to_string(),
                metadata: Default::default(),
            })
            .await
            .unwrap();
        assert!(!id.is_empty());

        graph
            .upsert_fact(&Fact::new("a", "b", "c", 0.5))
            .await
            .unwrap();
        let facts = graph.search_facts("a", 5).await.unwrap();
        assert_eq!(facts.len(), 1);
    }
}
