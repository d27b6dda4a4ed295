// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Engram memory layer.
//!
//! Provides the domain types, error type, clock abstraction, and the
//! port/strategy contracts the memory engine is written against. No I/O
//! happens here; concrete backends live in `engram-storage` and
//! reference strategies in `engram-engine`.

pub mod clock;
pub mod error;
pub mod traits;
pub mod types;

pub use clock::{Clock, SystemClock};
pub use error::EngramError;
pub use traits::{DistillStrategy, EmbeddingStrategy, GraphPort, LogStore, VectorPort};
pub use types::{Fact, LogRecord, Metadata, Observation, RecalledContext};
