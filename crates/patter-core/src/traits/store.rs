// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript store adapter trait.

use async_trait::async_trait;

use crate::error::PipelineError;
use crate::types::{Conversation, ConversationId, HealthStatus, TranscriptEntry};

/// Append-only, ordered-by-timestamp transcript storage.
///
/// The pipeline only ever reads conversations and appends entries. Creation
/// exists for the external seeder; deletion and entry mutation do not exist
/// at this boundary at all.
#[async_trait]
pub trait TranscriptStore: Send + Sync {
    /// Creates a conversation record. Used by the seeder, never by the
    /// pipeline.
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), PipelineError>;

    /// Fetches a conversation by id, or `None` when it does not exist.
    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, PipelineError>;

    /// Returns the full transcript in ascending timestamp order.
    async fn list_entries(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<TranscriptEntry>, PipelineError>;

    /// Appends one entry. Callers that need batch ordering await each append
    /// before issuing the next; the store itself does not guarantee
    /// write-order preservation for concurrent appends.
    async fn append_entry(&self, entry: &TranscriptEntry) -> Result<(), PipelineError>;

    /// Storage backend health, surfaced by the gateway health endpoint.
    async fn health_check(&self) -> Result<HealthStatus, PipelineError>;
}
