// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence layer for the Engram memory server.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a
//! single-writer concurrency model via `tokio-rusqlite`, typed query
//! modules for durable logs and fact triples, and a `sqlite-vec` backed
//! vector index.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;
pub mod vector;

pub use adapter::{SqliteGraphStore, SqliteLogStore};
pub use database::Database;
pub use vector::{VectorStore, register_vec_extension};
