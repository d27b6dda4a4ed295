// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference distillation strategy using simple rules.
//!
//! A real deployment would swap in an NLP- or LLM-backed strategy; this
//! one keeps the pipeline dependency-free.

use async_trait::async_trait;
use engram_core::{DistillStrategy, EngramError, Fact, Observation};

/// Confidence for facts carried explicitly in observation metadata.
const METADATA_CONFIDENCE: f64 = 0.9;
/// Confidence for the generic notes fallback.
const NOTES_CONFIDENCE: f64 = 0.4;
/// Maximum length of a notes snippet.
const SNIPPET_MAX_CHARS: usize = 80;
/// Subject used when an observation has no source.
const DEFAULT_SUBJECT: &str = "user";

/// Rule-based distiller:
/// - if metadata carries subject/predicate/object, emit that triple at
///   high confidence;
/// - otherwise emit a low-confidence `(source, "notes", snippet)` fact,
///   skipping observations with empty content.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicDistiller;

#[async_trait]
impl DistillStrategy for HeuristicDistiller {
    async fn distill(&self, observations: &[Observation]) -> Result<Vec<Fact>, EngramError> {
        let mut facts = Vec::new();
        for obs in observations {
            if let Some(fact) = triple_from_metadata(obs) {
                facts.push(fact);
                continue;
            }

            let snippet: String = obs.content.trim().chars().take(SNIPPET_MAX_CHARS).collect();
            if snippet.is_empty() {
                continue;
            }
            let subject = if obs.source.trim().is_empty() {
                DEFAULT_SUBJECT.to_string()
            } else {
                obs.source.clone()
            };
            facts.push(Fact::new(subject, "notes", snippet, NOTES_CONFIDENCE));
        }
        Ok(facts)
    }
}

fn triple_from_metadata(obs: &Observation) -> Option<Fact> {
    let subject = meta_str(obs, "subject")?;
    let predicate = meta_str(obs, "predicate")?;
    let object = meta_str(obs, "object")?;
    Some(Fact::new(subject, predicate, object, METADATA_CONFIDENCE))
}

fn meta_str<'a>(obs: &'a Observation, key: &str) -> Option<&'a str> {
    obs.metadata
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}
