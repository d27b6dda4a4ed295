// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Engram memory server.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Engram configuration.
///
/// Loaded from TOML files with environment variable overrides. All
/// sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngramConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Sensory buffer settings.
    #[serde(default)]
    pub buffer: BufferConfig,

    /// Vector index settings.
    #[serde(default)]
    pub vector: VectorConfig,

    /// Periodic consolidation settings.
    #[serde(default)]
    pub consolidation: ConsolidationConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind the server to.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            log_level: default_log_level(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("engram").join("engram.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("engram.db"))
        .to_string_lossy()
        .into_owned()
}

/// Sensory buffer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BufferConfig {
    /// Maximum number of buffered observations. Overflow evicts the
    /// oldest entry, so the buffer is lossy under sustained overload.
    #[serde(default = "default_buffer_capacity")]
    pub capacity: usize,

    /// Seconds before a buffered observation expires.
    #[serde(default = "default_buffer_ttl_secs")]
    pub ttl_secs: u64,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: default_buffer_capacity(),
            ttl_secs: default_buffer_ttl_secs(),
        }
    }
}

fn default_buffer_capacity() -> usize {
    128
}

fn default_buffer_ttl_secs() -> u64 {
    1800 // 30 minutes
}

/// Vector index configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct VectorConfig {
    /// Enable the vector modality. When false, recall degrades to
    /// graph-only results.
    #[serde(default = "default_vector_enabled")]
    pub enabled: bool,

    /// Embedding dimension. Must match the embedding strategy.
    #[serde(default = "default_vector_dimension")]
    pub dimension: usize,
}

impl Default for VectorConfig {
    fn default() -> Self {
        Self {
            enabled: default_vector_enabled(),
            dimension: default_vector_dimension(),
        }
    }
}

fn default_vector_enabled() -> bool {
    false
}

fn default_vector_dimension() -> usize {
    1536
}

/// Periodic consolidation configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConsolidationConfig {
    /// Seconds between consolidation runs.
    #[serde(default = "default_consolidation_interval_secs")]
    pub interval_secs: u64,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_consolidation_interval_secs(),
        }
    }
}

fn default_consolidation_interval_secs() -> u64 {
    300 // 5 minutes
}
