// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP API layer for the Engram memory engine.
//!
//! Exposes the engine's three operations plus a liveness probe:
//! `POST /v1/observe`, `GET /v1/recall`, `POST /v1/consolidate`,
//! `GET /health`.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, router, start_server};
