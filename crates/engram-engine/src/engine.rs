// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The memory engine orchestrator.
//!
//! Exposes exactly three operations -- observe, recall, consolidate --
//! and owns the sensory buffer, the pluggable strategies, and the
//! retrieval ports. It depends only on the port contracts, never on a
//! concrete backend.

use std::sync::Arc;

use engram_core::{
    DistillStrategy, EmbeddingStrategy, EngramError, GraphPort, LogRecord, LogStore, Observation,
    RecalledContext, VectorPort,
};
use tracing::debug;

use crate::buffer::SensoryBuffer;

/// Orchestrates the hybrid memory data flow.
pub struct MemoryEngine {
    buffer: SensoryBuffer,
    distiller: Arc<dyn DistillStrategy>,
    embedder: Arc<dyn EmbeddingStrategy>,
    log_store: Arc<dyn LogStore>,
    graph: Arc<dyn GraphPort>,
    vector: Arc<dyn VectorPort>,
}

impl MemoryEngine {
    pub fn new(
        buffer: SensoryBuffer,
        distiller: Arc<dyn DistillStrategy>,
        embedder: Arc<dyn EmbeddingStrategy>,
        log_store: Arc<dyn LogStore>,
        graph: Arc<dyn GraphPort>,
        vector: Arc<dyn VectorPort>,
    ) -> Self {
        Self {
            buffer,
            distiller,
            embedder,
            log_store,
            graph,
            vector,
        }
    }

    /// Record one observation: durable log write, buffer append, and --
    /// when the vector modality is enabled -- embedding upsert keyed by
    /// the log id.
    ///
    /// The log write commits first; if the embedding upsert then fails,
    /// the caller sees the error while the log row stays committed. That
    /// gap (log present, embedding missing) is the documented
    /// at-least-once behavior; a retry or backfill has to reconcile it.
    pub async fn observe(&self, observation: Observation) -> Result<(), EngramError> {
        let log_id = self.log_store.insert(&observation).await?;

        // The buffer append must happen regardless of embedding
        // availability.
        let content = observation.content.clone();
        self.buffer.add(observation);

        if self.vector.enabled() {
            let embedding = self.embedder.embed_text(&content).await?;
            self.vector.upsert_embedding(&log_id, &embedding).await?;
        }

        debug!(%log_id, buffered = self.buffer.len(), "observation recorded");
        Ok(())
    }

    /// Merge graph fact search with vector log retrieval.
    ///
    /// The two sub-searches are independent and run concurrently. There
    /// is no cross-modality ranking: facts and logs come back as two
    /// separate lists. A failure in either sub-search aborts the whole
    /// recall; a disabled vector port just yields no logs.
    pub async fn recall(&self, query: &str, top_k: i64) -> Result<RecalledContext, EngramError> {
        let (related_facts, related_logs) = tokio::try_join!(
            self.graph.search_facts(query, top_k),
            self.recall_logs(query, top_k),
        )?;

        debug!(
            facts = related_facts.len(),
            logs = related_logs.len(),
            "recall complete"
        );
        Ok(RecalledContext {
            related_logs,
            related_facts,
        })
    }

    async fn recall_logs(&self, query: &str, top_k: i64) -> Result<Vec<LogRecord>, EngramError> {
        if !self.vector.enabled() {
            return Ok(vec![]);
        }
        let embedding = self.embedder.embed_text(query).await?;
        let ids = self.vector.search(&embedding, top_k).await?;
        if ids.is_empty() {
            return Ok(vec![]);
        }
        // Best-effort join: ids evicted from the log store are omitted.
        self.log_store.fetch_many(&ids).await
    }

    /// Distill buffered observations into durable facts.
    ///
    /// Snapshot and clear happen atomically up front, so a failure later
    /// in the pipeline does NOT restore the buffer, and facts committed
    /// before the first failing upsert stay committed. Returns the
    /// number of facts written; an empty buffer is a successful no-op.
    pub async fn consolidate(&self) -> Result<usize, EngramError> {
        let snapshot = self.buffer.snapshot_and_clear();
        if snapshot.is_empty() {
            return Ok(0);
        }

        let facts = self.distiller.distill(&snapshot).await?;
        for fact in &facts {
            self.graph.upsert_fact(fact).await?;
        }

        debug!(
            observations = snapshot.len(),
            facts = facts.len(),
            "consolidation complete"
        );
        Ok(facts.len())
    }
}
