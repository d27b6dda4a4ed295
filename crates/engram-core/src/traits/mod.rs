// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Port and strategy contracts for the memory engine.
//!
//! The engine depends only on these traits; concrete backends (SQLite
//! stores, the hash embedder, the heuristic distiller) live in other
//! crates and are injected at wiring time.

pub mod distill;
pub mod embedding;
pub mod graph;
pub mod log_store;
pub mod vector;

pub use distill::DistillStrategy;
pub use embedding::EmbeddingStrategy;
pub use graph::GraphPort;
pub use log_store::LogStore;
pub use vector::VectorPort;
