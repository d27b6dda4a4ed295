// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the memory layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Free-form key/value metadata attached to an observation or log record.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One raw piece of captured interaction content, not yet a structured fact.
///
/// Observations carry no identity of their own; the durable log store
/// assigns one on insert.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Observation {
    /// The captured text.
    pub content: String,
    /// Where the observation came from (channel, sensor, caller label).
    #[serde(default)]
    pub source: String,
    /// Optional structured hints (e.g. subject/predicate/object).
    #[serde(default)]
    pub metadata: Metadata,
}

/// A structured (subject, predicate, object) assertion with a confidence
/// score in `[0, 1]`.
///
/// The triple is unique in durable storage; re-asserting it updates the
/// confidence rather than duplicating the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    /// Row identity assigned by the graph store; 0 until persisted.
    #[serde(default)]
    pub id: i64,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub confidence: f64,
    /// Set by the graph store on insert; `None` for not-yet-persisted facts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Fact {
    /// Build an unpersisted fact.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: 0,
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
            confidence,
            created_at: None,
        }
    }
}

/// A durable log row owned by the log store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

/// The merged result of one recall: facts from the graph modality and log
/// records from the vector modality, as two separate lists.
///
/// No cross-modality ranking is applied; fusion is the caller's concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecalledContext {
    pub related_logs: Vec<LogRecord>,
    pub related_facts: Vec<Fact>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_deserializes_with_defaults() {
        let obs: Observation = serde_json::from_str(r#"{"content": "hello"}"#).unwrap();
        assert_eq!(obs.content, "hello");
        assert!(obs.source.is_empty());
        assert!(obs.metadata.is_empty());
    }

    #[test]
    fn fact_new_is_unpersisted() {
        let fact = Fact::new("Alice", "likes", "vectors", 0.9);
        assert_eq!(fact.id, 0);
        assert!(fact.created_at.is_none());
        assert_eq!(fact.confidence, 0.9);
    }

    #[test]
    fn recalled_context_serializes_both_lists() {
        let ctx = RecalledContext {
            related_logs: vec![],
            related_facts: vec![Fact::new("a", "b", "c", 0.4)],
        };
        let json = serde_json::to_string(&ctx).unwrap();
        assert!(json.contains("\"related_logs\":[]"));
        assert!(json.contains("\"related_facts\""));
    }
}
