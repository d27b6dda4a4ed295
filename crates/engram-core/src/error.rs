// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Engram memory layer.

use thiserror::Error;

/// The primary error type used across port contracts and engine operations.
#[derive(Debug, Error)]
pub enum EngramError {
    /// Invalid input (empty required field, out-of-range parameter).
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// An embedding's length does not match the configured vector dimension.
    #[error("embedding dimension mismatch: got {got}, want {want}")]
    DimensionMismatch { got: usize, want: usize },

    /// An underlying store call failed. `port` names the failing stage
    /// (log store, graph, vector) so callers can tell which write or
    /// search went wrong.
    #[error("{port} port unavailable: {source}")]
    PortUnavailable {
        port: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A distillation strategy failed the whole batch.
    #[error("distillation failed: {0}")]
    Distillation(String),

    /// An embedding strategy could not process its input.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl EngramError {
    /// Wrap a collaborator failure with the name of the failing port.
    pub fn port(
        port: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        EngramError::PortUnavailable {
            port,
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_failing_stage() {
        let err = EngramError::port("graph", std::io::Error::other("disk full"));
        let rendered = err.to_string();
        assert!(rendered.contains("graph"), "got: {rendered}");
        assert!(rendered.contains("disk full"), "got: {rendered}");
    }

    #[test]
    fn dimension_mismatch_reports_both_sizes() {
        let err = EngramError::DimensionMismatch { got: 3, want: 1536 };
        let rendered = err.to_string();
        assert!(rendered.contains('3'));
        assert!(rendered.contains("1536"));
    }
}
