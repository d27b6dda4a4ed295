// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All writes are serialized through `tokio-rusqlite`'s single background
//! thread: the [`Database`] struct IS the single writer. Query modules
//! accept `&Database` and call through `connection().call()`, which
//! eliminates SQLITE_BUSY errors under concurrent access.
//!
//! **Do NOT create additional Connection instances for writes.**

use std::path::Path;

use engram_core::EngramError;
use tokio_rusqlite::Connection;
use tracing::debug;

/// Handle to the single WAL-mode SQLite connection.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at `path`, apply PRAGMAs, and run
    /// embedded migrations.
    pub async fn open(path: &str) -> Result<Self, EngramError> {
        if let Some(parent) = Path::new(path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| EngramError::port("storage", e))?;
        }
        let conn = Connection::open(path)
            .await
            .map_err(|e| EngramError::port("storage", e))?;
        let db = Self::initialize(conn).await?;
        debug!(path, "database opened");
        Ok(db)
    }

    /// Open an in-memory database with the full schema. Used in tests.
    pub async fn open_in_memory() -> Result<Self, EngramError> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| EngramError::port("storage", e))?;
        Self::initialize(conn).await
    }

    async fn initialize(conn: Connection) -> Result<Self, EngramError> {
        let migration_result: Result<(), EngramError> = conn
            .call(|conn| {
                conn.execute_batch(
                    "PRAGMA journal_mode=WAL;
                     PRAGMA foreign_keys=ON;
                     PRAGMA busy_timeout=5000;
                     PRAGMA synchronous=NORMAL;",
                )?;
                Ok(crate::migrations::run_migrations(conn))
            })
            .await
            .map_err(|e: tokio_rusqlite::Error| EngramError::port("storage", e))?;
        migration_result?;
        Ok(Self { conn })
    }

    /// The underlying connection, for query modules.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Flush the WAL into the main database file. Called on shutdown.
    pub async fn checkpoint(&self) -> Result<(), EngramError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(|e: tokio_rusqlite::Error| EngramError::port("storage", e))?;
        debug!("WAL checkpoint complete");
        Ok(())
    }
}

/// Parse a stored `strftime('%Y-%m-%dT%H:%M:%fZ')` timestamp, falling back
/// to the epoch on malformed rows.
pub(crate) fn parse_timestamp(raw: &str) -> chrono::DateTime<chrono::Utc> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn open_in_memory_applies_schema() {
        let db = Database::open_in_memory().await.unwrap();
        let count: i64 = db
            .conn
            .call(|conn| {
                let n = conn.query_row(
                    "SELECT count(*) FROM sqlite_master WHERE type = 'table' AND name IN ('memory_logs', 'facts')",
                    [],
                    |row| row.get(0),
                )?;
                Ok::<i64, tokio_rusqlite::Error>(n)
            })
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/engram.db");
        let db = Database::open(path.to_str().unwrap()).await.unwrap();
        db.checkpoint().await.unwrap();
        assert!(path.exists());
    }

    #[test]
    fn parse_timestamp_roundtrip() {
        use chrono::TimeZone;
        let ts = parse_timestamp("2026-03-01T12:30:45.123Z");
        let expected = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 45).unwrap();
        assert_eq!(ts.timestamp(), expected.timestamp());
        assert_eq!(ts.timestamp_subsec_millis(), 123);
    }

    #[test]
    fn parse_timestamp_malformed_falls_back() {
        let ts = parse_timestamp("not a timestamp");
        assert_eq!(ts.timestamp(), 0);
    }
}
