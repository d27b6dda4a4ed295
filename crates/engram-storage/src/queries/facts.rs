// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fact triple operations.

use engram_core::{EngramError, Fact};
use rusqlite::params;

use crate::database::{Database, parse_timestamp};

fn graph_err(e: tokio_rusqlite::Error) -> EngramError {
    EngramError::port("graph", e)
}

/// Insert a fact, or update its confidence if the (subject, predicate,
/// object) triple already exists. Returns the row id.
pub async fn upsert_fact(db: &Database, fact: &Fact) -> Result<i64, EngramError> {
    let subject = fact.subject.clone();
    let predicate = fact.predicate.clone();
    let object = fact.object.clone();
    let confidence = fact.confidence;

    db.connection()
        .call(move |conn| {
            let id = conn.query_row(
                "INSERT INTO facts (subject, predicate, object, confidence)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(subject, predicate, object)
                 DO UPDATE SET confidence = excluded.confidence
                 RETURNING id",
                params![subject, predicate, object, confidence],
                |row| row.get(0),
            )?;
            Ok(id)
        })
        .await
        .map_err(graph_err)
}

/// Substring search over subject and object, most recent first.
/// A limit of zero or below falls back to 5.
pub async fn search_facts(db: &Database, term: &str, limit: i64) -> Result<Vec<Fact>, EngramError> {
    let limit = if limit <= 0 { 5 } else { limit };
    let pattern = format!("%{term}%");
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, subject, predicate, object, confidence, created_at
                 FROM facts
                 WHERE subject LIKE ?1 OR object LIKE ?1
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let facts = stmt
                .query_map(params![pattern, limit], row_to_fact)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(facts)
        })
        .await
        .map_err(graph_err)
}

/// Facts whose subject or object equals `entity`, ordered by confidence
/// descending then recency descending.
pub async fn neighbors(db: &Database, entity: &str, limit: i64) -> Result<Vec<Fact>, EngramError> {
    let limit = if limit <= 0 { 5 } else { limit };
    let entity = entity.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, subject, predicate, object, confidence, created_at
                 FROM facts
                 WHERE subject = ?1 OR object = ?1
                 ORDER BY confidence DESC, created_at DESC, id DESC
                 LIMIT ?2",
            )?;
            let facts = stmt
                .query_map(params![entity, limit], row_to_fact)?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(facts)
        })
        .await
        .map_err(graph_err)
}

fn row_to_fact(row: &rusqlite::Row) -> Result<Fact, rusqlite::Error> {
    let created_at: String = row.get(5)?;
    Ok(Fact {
        id: row.get(0)?,
        subject: row.get(1)?,
        predicate: row.get(2)?,
        object: row.get(3)?,
        confidence: row.get(4)?,
        created_at: Some(parse_timestamp(&created_at)),
    })
}
