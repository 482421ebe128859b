// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the TranscriptStore trait.

use async_trait::async_trait;
use tracing::debug;

use patter_config::model::StorageConfig;
use patter_core::{
    Conversation, ConversationId, HealthStatus, PipelineError, TranscriptEntry, TranscriptStore,
};

use crate::database::Database;
use crate::queries;

/// SQLite-backed transcript store.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. All writes serialize through the single background
/// connection thread; ordering guarantees beyond that (batch ordering) are
/// the caller's responsibility via sequential awaited appends.
pub struct SqliteTranscriptStore {
    db: Database,
}

impl SqliteTranscriptStore {
    /// Open the store at the configured database path, running migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, PipelineError> {
        let db = Database::open(&config.database_path).await?;
        debug!(path = %config.database_path, "SQLite transcript store opened");
        Ok(Self { db })
    }

    /// Checkpoint the WAL and release the connection.
    pub async fn close(&self) -> Result<(), PipelineError> {
        self.db.close().await
    }

    /// Entries in physical write order, ignoring the timestamp sort key.
    /// Test-facing: verifies persistence order independently of timestamps.
    pub async fn list_entries_in_write_order(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<TranscriptEntry>, PipelineError> {
        queries::entries::list_in_write_order(&self.db, id).await
    }
}

#[async_trait]
impl TranscriptStore for SqliteTranscriptStore {
    async fn create_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<(), PipelineError> {
        queries::conversations::create_conversation(&self.db, conversation).await
    }

    async fn get_conversation(
        &self,
        id: &ConversationId,
    ) -> Result<Option<Conversation>, PipelineError> {
        queries::conversations::get_conversation(&self.db, id).await
    }

    async fn list_entries(
        &self,
        id: &ConversationId,
    ) -> Result<Vec<TranscriptEntry>, PipelineError> {
        queries::entries::list_for_conversation(&self.db, id).await
    }

    async fn append_entry(&self, entry: &TranscriptEntry) -> Result<(), PipelineError> {
        queries::entries::insert_entry(&self.db, entry).await
    }

    async fn health_check(&self) -> Result<HealthStatus, PipelineError> {
        self.db
            .connection()
            .call(|conn| {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }
}
