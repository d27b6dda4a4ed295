// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and positive capacities.

use thiserror::Error;

use crate::model::EngramConfig;

/// A configuration load or validation failure.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// TOML parse or merge failure from Figment.
    #[error("{0}")]
    Figment(#[from] figment::Error),

    /// Semantic validation failure.
    #[error("{message}")]
    Validation { message: String },
}

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &EngramConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let addr = config.server.bind_address.trim();
    if addr.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.bind_address must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = addr.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = addr
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!(
                    "server.bind_address `{addr}` is not a valid IP address or hostname"
                ),
            });
        }
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.buffer.capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "buffer.capacity must be at least 1".to_string(),
        });
    }

    if config.buffer.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "buffer.ttl_secs must be at least 1".to_string(),
        });
    }

    if config.vector.dimension == 0 {
        errors.push(ConfigError::Validation {
            message: "vector.dimension must be at least 1".to_string(),
        });
    }

    if config.consolidation.interval_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "consolidation.interval_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
