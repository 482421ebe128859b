// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response pipeline for the Patter agent.
//!
//! Turns one incoming conversational turn into a batch of outgoing agent
//! messages: generated by a pluggable backend, parsed out of delimited free
//! text or a validated structured schema, sanitized against domain
//! constraints, staggered in time to read as human-paced, and persisted in
//! strict generation order.
//!
//! Stage order: [`history`] -> [`prompt`] -> backend -> [`segment`] ->
//! [`sanitize`] -> [`schedule`] -> persistence (inside [`pipeline`]). Each
//! stage is synchronous relative to one invocation; there are no background
//! workers and no pipeline-level retries.

pub mod history;
pub mod pipeline;
pub mod prompt;
pub mod prompts;
pub mod sanitize;
pub mod schedule;
pub mod segment;

pub use pipeline::ResponsePipeline;
