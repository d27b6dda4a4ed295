// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for configuration loading and validation.

use engram_config::{load_and_validate_str, load_config_from_str};

#[test]
fn defaults_match_documented_values() {
    let config = load_config_from_str("").expect("empty config should load");
    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.log_level, "info");
    assert_eq!(config.buffer.capacity, 128);
    assert_eq!(config.buffer.ttl_secs, 1800);
    assert!(!config.vector.enabled);
    assert_eq!(config.vector.dimension, 1536);
    assert_eq!(config.consolidation.interval_secs, 300);
}

#[test]
fn toml_overrides_defaults() {
    let toml = r#"
        [server]
        port = 9090

        [buffer]
        capacity = 16
        ttl_secs = 60

        [vector]
        enabled = true
        dimension = 384
    "#;
    let config = load_config_from_str(toml).expect("config should load");
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.buffer.capacity, 16);
    assert_eq!(config.buffer.ttl_secs, 60);
    assert!(config.vector.enabled);
    assert_eq!(config.vector.dimension, 384);
    // Untouched sections keep their defaults.
    assert_eq!(config.consolidation.interval_secs, 300);
}

#[test]
fn unknown_keys_are_rejected() {
    let toml = r#"
        [buffer]
        capcity = 10
    "#;
    assert!(load_config_from_str(toml).is_err(), "typo'd key should fail");
}

#[test]
fn unknown_sections_are_rejected() {
    let toml = r#"
        [telemetry]
        enabled = true
    "#;
    assert!(load_config_from_str(toml).is_err());
}

#[test]
fn validation_rejects_zero_capacity() {
    let toml = r#"
        [buffer]
        capacity = 0
    "#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("buffer.capacity"))
    );
}

#[test]
fn valid_config_passes_validation() {
    let toml = r#"
        [storage]
        database_path = "/tmp/engram-test.db"
    "#;
    let config = load_and_validate_str(toml).expect("should validate");
    assert_eq!(config.storage.database_path, "/tmp/engram-test.db");
}
