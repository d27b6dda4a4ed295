// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic consolidation task.
//!
//! The engine itself has no internal timer; the surrounding service
//! spawns this loop and hands it a cancellation token. Cancellation
//! mid-batch leaves already-committed facts committed and does not
//! restore cleared buffer entries.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use crate::engine::MemoryEngine;

/// Fallback interval when none is configured.
const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

/// Run `consolidate` on a fixed interval until the token is cancelled.
///
/// Failures are logged and the loop keeps going; one bad batch must not
/// stop future consolidation.
pub async fn run_consolidation_loop(
    engine: Arc<MemoryEngine>,
    every: Duration,
    cancel: CancellationToken,
) {
    let every = if every.is_zero() { DEFAULT_INTERVAL } else { every };
    let mut interval = tokio::time::interval(every);
    // The first tick fires immediately; skip it so the loop waits a full
    // period before the first run.
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match engine.consolidate().await {
                    Ok(0) => debug!("consolidation: buffer empty"),
                    Ok(count) => info!(facts = count, "consolidation committed facts"),
                    Err(e) => error!(error = %e, "consolidation failed"),
                }
            }
            _ = cancel.cancelled() => {
                debug!("consolidation loop stopped");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration as ChronoDuration;
    use engram_core::{Observation, SystemClock};

    use super::*;
    use crate::buffer::SensoryBuffer;
    use crate::distill::HeuristicDistiller;
    use crate::embed::HashEmbedder;
    use crate::testutil::{MemLogStore, RecordingGraph, StaticVector};

    fn engine_with_graph(graph: Arc<RecordingGraph>) -> Arc<MemoryEngine> {
        Arc::new(MemoryEngine::new(
            SensoryBuffer::new(128, ChronoDuration::seconds(1800), Arc::new(SystemClock)),
            Arc::new(HeuristicDistiller),
            Arc::new(HashEmbedder::new(16)),
            Arc::new(MemLogStore::default()),
            graph,
            Arc::new(StaticVector::disabled()),
        ))
    }

    #[tokio::test]
    async fn loop_exits_promptly_on_cancellation() {
        let engine = engine_with_graph(Arc::new(RecordingGraph::default()));
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_consolidation_loop(
            engine,
            Duration::from_secs(3600),
            cancel.clone(),
        ));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("loop should stop quickly")
            .unwrap();
    }

    #[tokio::test]
    async fn loop_consolidates_buffered_observations() {
        let graph = Arc::new(RecordingGraph::default());
        let engine = engine_with_graph(graph.clone());
        engine
            .observe(Observation {
                content: "periodic pickup".to_string(),
                source: "test".to_string(),
                metadata: Default::default(),
            })
            .await
            .unwrap();

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run_consolidation_loop(
            engine,
            Duration::from_millis(10),
            cancel.clone(),
        ));

        // Give the loop a few ticks to run.
        for _ in 0..50 {
            if graph.upsert_count() > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(graph.facts.lock().unwrap().len(), 1);
    }
}
