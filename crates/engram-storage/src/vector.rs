// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Vector similarity search backed by the `sqlite-vec` extension.
//!
//! Embeddings are stored in a `vec0` virtual table as little-endian f32
//! BLOBs, with a payload table mapping vector rowids back to log ids.
//! The whole module degrades to no-ops when the vector modality is
//! disabled by configuration.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use engram_core::{EngramError, VectorPort};
use rusqlite::params;
use tracing::debug;

use crate::database::Database;

/// Register `sqlite-vec` as an auto extension for every connection
/// opened afterwards. Must be called before [`Database::open`] when the
/// vector modality is enabled. Safe to call more than once.
pub fn register_vec_extension() {
    unsafe {
        rusqlite::ffi::sqlite3_auto_extension(Some(std::mem::transmute(
            sqlite_vec::sqlite3_vec_init as *const (),
        )));
    }
}

/// Convert an f32 vector to bytes for SQLite BLOB storage.
pub fn vec_to_blob(vec: &[f32]) -> Vec<u8> {
    vec.iter().flat_map(|f| f.to_le_bytes()).collect()
}

/// Convert a SQLite BLOB back to an f32 vector.
pub fn blob_to_vec(blob: &[u8]) -> Vec<f32> {
    blob.chunks_exact(4)
        .map(|chunk| f32::from_le_bytes(chunk.try_into().unwrap()))
        .collect()
}

/// SQLite-vec backed implementation of [`VectorPort`].
pub struct VectorStore {
    db: Arc<Database>,
    enabled: bool,
    dim: usize,
}

impl VectorStore {
    pub fn new(db: Arc<Database>, enabled: bool, dim: usize) -> Self {
        Self { db, enabled, dim }
    }

    /// Create the vector tables if the modality is enabled.
    ///
    /// Runs outside the refinery migrations because the table shape
    /// depends on the configured dimension.
    pub async fn ensure_schema(&self) -> Result<(), EngramError> {
        if !self.enabled {
            return Ok(());
        }
        let dim = self.dim;
        self.db
            .connection()
            .call(move |conn| {
                conn.execute_batch(&format!(
                    "CREATE VIRTUAL TABLE IF NOT EXISTS vec_observations
                         USING vec0(embedding float[{dim}]);
                     CREATE TABLE IF NOT EXISTS vec_payload (
                         rowid INTEGER PRIMARY KEY,
                         log_id TEXT NOT NULL
                     );"
                ))?;
                Ok(())
            })
            .await
            .map_err(|e: tokio_rusqlite::Error| EngramError::port("vector", e))?;
        debug!(dim, "vector schema ready");
        Ok(())
    }

    fn check_dimension(&self, embedding: &[f32]) -> Result<(), EngramError> {
        if embedding.is_empty() {
            return Err(EngramError::Validation("embedding is empty".to_string()));
        }
        if embedding.len() != self.dim {
            return Err(EngramError::DimensionMismatch {
                got: embedding.len(),
                want: self.dim,
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VectorPort for VectorStore {
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
        self.check_dimension(embedding)?;

        let blob = vec_to_blob(embedding);
        let log_id = log_id.to_string();
        self.db
            .connection()
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    "INSERT INTO vec_observations (embedding) VALUES (?1)",
                    params![blob],
                )?;
                let rowid = tx.last_insert_rowid();
                tx.execute(
                    "INSERT INTO vec_payload (rowid, log_id) VALUES (?1, ?2)",
                    params![rowid, log_id],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(|e: tokio_rusqlite::Error| EngramError::port("vector", e))
    }

    async fn search(&self, embedding: &[f32], top_k: i64) -> Result<Vec<String>, EngramError> {
        if !self.enabled {
            return Ok(vec![]);
        }
        self.check_dimension(embedding)?;
        let top_k = if top_k <= 0 { 5 } else { top_k };

        let blob = vec_to_blob(embedding);
        self.db
            .connection()
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT rowid FROM vec_observations
                     WHERE embedding MATCH ?1 AND k = ?2
                     ORDER BY distance",
                )?;
                let rowids = stmt
                    .query_map(params![blob, top_k], |row| row.get::<_, i64>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                if rowids.is_empty() {
                    return Ok(vec![]);
                }

                let placeholders: Vec<String> =
                    (1..=rowids.len()).map(|i| format!("?{i}")).collect();
                let sql = format!(
                    "SELECT rowid, log_id FROM vec_payload WHERE rowid IN ({})",
                    placeholders.join(", ")
                );
                let mut stmt = conn.prepare(&sql)?;
                let params: Vec<&dyn rusqlite::types::ToSql> =
                    rowids.iter().map(|id| id as &dyn rusqlite::types::ToSql).collect();
                let by_rowid: HashMap<i64, String> = stmt
                    .query_map(params.as_slice(), |row| {
                        Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
                    })?
                    .collect::<Result<HashMap<_, _>, _>>()?;

                // Preserve similarity order from the KNN query.
                let ids = rowids
                    .into_iter()
                    .filter_map(|rowid| by_rowid.get(&rowid).cloned())
                    .collect();
                Ok(ids)
            })
            .await
            .map_err(|e: tokio_rusqlite::Error| EngramError::port("vector", e))
    }
}
