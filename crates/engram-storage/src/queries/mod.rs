// SPDX-FileCopyrightText: 2026 Engram Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed query modules. Free async functions over [`Database`](crate::Database).

pub mod facts;
pub mod logs;
