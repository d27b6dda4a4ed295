// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `engram serve` command implementation.
//!
//! Wires the SQLite stores, the reference strategies, and the memory
//! engine, spawns the periodic consolidation task, and serves the HTTP
//! gateway until a shutdown signal arrives.

use std::sync::Arc;
use std::time::Duration;

use engram_config::EngramConfig;
use engram_core::{EngramError, SystemClock};
use engram_engine::{
    HashEmbedder, HeuristicDistiller, MemoryEngine, SensoryBuffer, run_consolidation_loop,
};
use engram_gateway::{GatewayState, ServerConfig, start_server};
use engram_storage::{Database, SqliteGraphStore, SqliteLogStore, VectorStore};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `engram serve` command.
pub async fn run_serve(config: EngramConfig) -> Result<(), EngramError> {
    init_tracing(&config.server.log_level);

    info!("starting engram serve");

    // The vec0 module must be registered before the connection opens.
    if config.vector.enabled {
        engram_storage::register_vec_extension();
    }

    let db = Arc::new(Database::open(&config.storage.database_path).await?);

    let log_store = Arc::new(SqliteLogStore::new(db.clone()));
    let graph = Arc::new(SqliteGraphStore::new(db.clone()));
    let vector = Arc::new(VectorStore::new(
        db.clone(),
        config.vector.enabled,
        config.vector.dimension,
    ));
    vector.ensure_schema().await?;

    if config.vector.enabled {
        info!(dimension = config.vector.dimension, "vector modality enabled");
    } else {
        info!("vector modality disabled; recall degrades to graph-only");
    }

    let buffer = SensoryBuffer::new(
        config.buffer.capacity,
        chrono::Duration::seconds(config.buffer.ttl_secs as i64),
        Arc::new(SystemClock),
    );
    let engine = Arc::new(MemoryEngine::new(
        buffer,
        Arc::new(HeuristicDistiller),
        Arc::new(HashEmbedder::new(config.vector.dimension)),
        log_store,
        graph,
        vector,
    ));
    info!(
        capacity = config.buffer.capacity,
        ttl_secs = config.buffer.ttl_secs,
        "memory engine initialized"
    );

    let cancel = shutdown::install_signal_handler();

    // Periodic consolidation is scheduled here, not inside the engine.
    let consolidation = tokio::spawn(run_consolidation_loop(
        engine.clone(),
        Duration::from_secs(config.consolidation.interval_secs),
        cancel.clone(),
    ));
    info!(
        interval_secs = config.consolidation.interval_secs,
        "consolidation task started"
    );

    let server_config = ServerConfig {
        host: config.server.bind_address.clone(),
        port: config.server.port,
    };
    let result = start_server(&server_config, GatewayState::new(engine), cancel.clone()).await;

    // Stop the consolidation loop even if the server exited on its own.
    cancel.cancel();
    if let Err(e) = consolidation.await {
        warn!(error = %e, "consolidation task did not shut down cleanly");
    }
    db.checkpoint().await?;

    info!("engram serve stopped");
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("engram={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
