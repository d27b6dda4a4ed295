// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Durable observation log operations.

use engram_core::{EngramError, LogRecord, Observation};
use rusqlite::params;
use uuid::Uuid;

use crate::database::{Database, parse_timestamp};

fn log_err(e: tokio_rusqlite::Error) -> EngramError {
    EngramError::port("log store", e)
}

/// Insert a new log row and return its assigned id.
///
/// Rejects observations with empty (or whitespace-only) content.
pub async fn insert_log(db: &Database, observation: &Observation) -> Result<String, EngramError> {
    if observation.content.trim().is_empty() {
        return Err(EngramError::Validation(
            "observation content must not be empty".to_string(),
        ));
    }

    let id = Uuid::new_v4().to_string();
    let row_id = id.clone();
    let source = observation.source.clone();
    let content = observation.content.clone();
    let metadata = serde_json::to_string(&observation.metadata)
        .map_err(|e| EngramError::Internal(format!("metadata serialization failed: {e}")))?;

    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO memory_logs (id, timestamp, source_type, content, metadata)
                 VALUES (?1, strftime('%Y-%m-%dT%H:%M:%fZ', 'now'), ?2, ?3, ?4)",
                params![row_id, source, content, metadata],
            )?;
            Ok(())
        })
        .await
        .map_err(log_err)?;

    Ok(id)
}

/// Fetch log rows by id, best-effort: missing ids are omitted and result
/// order is unspecified.
pub async fn fetch_logs(db: &Database, ids: &[String]) -> Result<Vec<LogRecord>, EngramError> {
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let ids = ids.to_vec();
    db.connection()
        .call(move |conn| {
            let placeholders: Vec<String> = (1..=ids.len()).map(|i| format!("?{i}")).collect();
            let sql = format!(
                "SELECT id, timestamp, source_type, content, metadata
                 FROM memory_logs WHERE id IN ({})",
                placeholders.join(", ")
            );
            let mut stmt = conn.prepare(&sql)?;

            let params: Vec<&dyn rusqlite::types::ToSql> =
                ids.iter().map(|id| id as &dyn rusqlite::types::ToSql).collect();
            let records = stmt
                .query_map(params.as_slice(), row_to_log)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(log_err)
}

/// Latest log rows, newest first. A limit of zero or below falls back to 50.
pub async fn recent_logs(db: &Database, limit: i64) -> Result<Vec<LogRecord>, EngramError> {
    let limit = if limit <= 0 { 50 } else { limit };
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, timestamp, source_type, content, metadata
                 FROM memory_logs ORDER BY timestamp DESC, rowid DESC LIMIT ?1",
            )?;
            let records = stmt
                .query_map(params![limit], row_to_log)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(records)
        })
        .await
        .map_err(log_err)
}

fn row_to_log(row: &rusqlite::Row) -> Result<LogRecord, rusqlite::Error> {
    let timestamp: String = row.get(1)?;
    let metadata: Option<String> = row.get(4)?;
    Ok(LogRecord {
        id: row.get(0)?,
        timestamp: parse_timestamp(&timestamp),
        source: row.get(2)?,
        content: row.get(3)?,
        metadata: metadata
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(content: &str, source: &str) -> Observation {
        Observation {
            content: content.to_string(),
            source: source.to_string(),
            metadata: Default::default(),
        }
    }

    #[tokio::test]
    async fn insert_and_fetch_roundtrip() {
        let db = Database::open_in_memory().await.unwrap();
        let mut obs = observation("Alice likes vectors", "chat");
        obs.metadata
            .insert("subject".to_string(), "Alice".into());

        let id = insert_log(&db, &obs).await.unwrap();
        let records = fetch_logs(&db, &[id.clone()]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(records[0].content, "Alice likes vectors");
        assert_eq!(records[0].source, "chat");
        assert_eq!(
            records[0].metadata.get("subject").and_then(|v| v.as_str()),
            Some("Alice")
        );
    }

    #[tokio::test]
    async fn insert_rejects_empty_content() {
        let db = Database::open_in_memory().await.unwrap();
        let err = insert_log(&db, &observation("   ", "chat")).await.unwrap_err();
        assert!(matches!(err, EngramError::Validation(_)));
    }

    #[tokio::test]
    async fn fetch_omits_missing_ids() {
        let db = Database::open_in_memory().await.unwrap();
        let id = insert_log(&db, &observation("kept", "chat")).await.unwrap();

        let records = fetch_logs(&db, &[id, "no-such-id".to_string()]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].content, "kept");
    }

    #[tokio::test]
    async fn fetch_with_no_ids_is_empty() {
        let db = Database::open_in_memory().await.unwrap();
        assert!(fetch_logs(&db, &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn recent_returns_newest_first() {
        let db = Database::open_in_memory().await.unwrap();
        insert_log(&db, &observation("first", "chat")).await.unwrap();
        insert_log(&db, &observation("second", "chat")).await.unwrap();
        insert_log(&db, &observation("third", "chat")).await.unwrap();

        let records = recent_logs(&db, 2).await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].content, "third");
        assert_eq!(records[1].content, "second");
    }

    #[tokio::test]
    async fn recent_limit_falls_back_to_default() {
        let db = Database::open_in_memory().await.unwrap();
        insert_log(&db, &observation("only", "chat")).await.unwrap();
        let records = recent_logs(&db, 0).await.unwrap();
        assert_eq!(records.len(), 1);
    }
}
