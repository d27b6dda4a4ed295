// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory test doubles for the port contracts.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use engram_core::{
    Clock, EngramError, Fact, GraphPort, LogRecord, LogStore, Observation, VectorPort,
};

/// A clock that only moves when told to.
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()),
        }
    }
}

impl ManualClock {
    pub(crate) fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// In-memory log store. Assigns sequential ids `log-1`, `log-2`, ...
#[derive(Default)]
pub(crate) struct MemLogStore {
    pub(crate) inserted: Mutex<Vec<Observation>>,
    pub(crate) records: Mutex<Vec<LogRecord>>,
    pub(crate) fail_insert: bool,
}

impl MemLogStore {
    pub(crate) fn with_records(records: Vec<LogRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub(crate) fn record(id: &str, content: &str) -> LogRecord {
        LogRecord {
            id: id.to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            source: "test".to_string(),
            content: content.to_string(),
            metadata: Default::default(),
        }
    }
}

#[async_trait]
impl LogStore for MemLogStore {
    async fn insert(&self, observation: &Observation) -> Result<String, EngramError> {
        if self.fail_insert {
            return Err(EngramError::port(
                "log store",
                std::io::Error::other("insert refused"),
            ));
        }
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(observation.clone());
        Ok(format!("log-{}", inserted.len()))
    }

    async fn fetch_many(&self, ids: &[String]) -> Result<Vec<LogRecord>, EngramError> {
        let records = self.records.lock().unwrap();
        Ok(records
            .iter()
            .filter(|r| ids.contains(&r.id))
            .cloned()
            .collect())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LogRecord>, EngramError> {
        let limit = if limit <= 0 { 50 } else { limit } as usize;
        let records = self.records.lock().unwrap();
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}

/// In-memory graph port that records upserts and can fail on the n-th call.
#[derive(Default)]
pub(crate) struct RecordingGraph {
    pub(crate) facts: Mutex<Vec<Fact>>,
    pub(crate) search_results: Mutex<Vec<Fact>>,
    /// 1-based index of the upsert call that should fail.
    pub(crate) fail_on_upsert: Option<usize>,
    calls: AtomicUsize,
}

impl RecordingGraph {
    pub(crate) fn failing_on(call: usize) -> Self {
        Self {
            fail_on_upsert: Some(call),
            ..Default::default()
        }
    }

    pub(crate) fn with_search_results(results: Vec<Fact>) -> Self {
        Self {
            search_results: Mutex::new(results),
            ..Default::default()
        }
    }

    pub(crate) fn upsert_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GraphPort for RecordingGraph {
    async fn upsert_fact(&self, fact: &Fact) -> Result<i64, EngramError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on_upsert == Some(call) {
            return Err(EngramError::port(
                "graph",
                std::io::Error::other("upsert refused"),
            ));
        }
        self.facts.lock().unwrap().push(fact.clone());
        Ok(call as i64)
    }

    async fn search_facts(&self, _term: &str, _limit: i64) -> Result<Vec<Fact>, EngramError> {
        Ok(self.search_results.lock().unwrap().clone())
    }

    async fn neighbors(&self, _entity: &str, _limit: i64) -> Result<Vec<Fact>, EngramError> {
        Ok(vec![])
    }
}

/// Graph port that always fails, for recall error propagation tests.
pub(crate) struct FailingGraph;

#[async_trait]
impl GraphPort for FailingGraph {
    async fn upsert_fact(&self, _fact: &Fact) -> Result<i64, EngramError> {
        Err(EngramError::port("graph", std::io::Error::other("down")))
    }

    async fn search_facts(&self, _term: &str, _limit: i64) -> Result<Vec<Fact>, EngramError> {
        Err(EngramError::port("graph", std::io::Error::other("down")))
    }

    async fn neighbors(&self, _entity: &str, _limit: i64) -> Result<Vec<Fact>, EngramError> {
        Err(EngramError::port("graph", std::io::Error::other("down")))
    }
}

/// Vector port returning a fixed id list, recording upserts.
#[derive(Default)]
pub(crate) struct StaticVector {
    pub(crate) enabled: bool,
    pub(crate) search_ids: Vec<String>,
    pub(crate) upserts: Mutex<Vec<(String, Vec<f32>)>>,
    pub(crate) fail_upsert: bool,
}

impl StaticVector {
    pub(crate) fn enabled_with_ids(ids: &[&str]) -> Self {
        Self {
            enabled: true,
            search_ids: ids.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn disabled() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorPort for StaticVector {
    fn enabled(&self) -> bool {
        self.enabled
    }

    async fn upsert_embedding(
        &self,
        log_id: &str,
        embedding: &[f32],
    ) -> Result<(), EngramError> {
        if !self.enabled {
            return Ok(());
        }
        if self.fail_upsert {
            return Err(EngramError::port(
                "vector",
                std::io::Error::other("index offline"),
            ));
        }
        self.upserts
            .lock()
            .unwrap()
            .push((log_id.to_string(), embedding.to_vec()));
        Ok(())
    }

    async fn search(&self, _embedding: &[f32], _top_k: i64) -> Result<Vec<String>, EngramError> {
        if !self.enabled {
            return Ok(vec![]);
        }
        Ok(self.search_ids.clone())
    }
}
