// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Patter integration tests: a deterministic mock
//! backend and a temp-directory SQLite harness.

pub mod harness;
pub mod mock_backend;

pub use harness::{TempStore, append_counterpart_message, seed_conversation};
pub use mock_backend::MockBackend;
