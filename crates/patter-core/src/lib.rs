// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Patter agent.
//!
//! This crate provides the foundational trait definitions, error types, and
//! domain types used throughout the Patter workspace. Backend and storage
//! adapters implement traits defined here.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PipelineError;
pub use traits::{ResponseBackend, TranscriptStore};
pub use types::{
    AgentMetadata, AssembledPrompt, BackendKind, Conversation, ConversationId, Credentials,
    EntryId, GenerationResult, HealthStatus, NextAction, Phase, RawOutput, StructuredMessage,
    StructuredReply, TranscriptEntry,
};
