// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage harness: a real SQLite transcript store on a temp directory,
//! plus the standard conversation seeding used across tests.

use std::sync::Arc;

use chrono::{SecondsFormat, Utc};
use tempfile::TempDir;
use uuid::Uuid;

use patter_config::model::StorageConfig;
use patter_core::{
    BackendKind, Conversation, ConversationId, EntryId, TranscriptEntry, TranscriptStore,
};
use patter_storage::SqliteTranscriptStore;

/// A transcript store backed by a database file in a temp directory that
/// lives as long as this value.
pub struct TempStore {
    pub store: Arc<SqliteTranscriptStore>,
    _dir: TempDir,
}

impl TempStore {
    /// Open a fresh store with migrations applied.
    pub async fn open() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = StorageConfig {
            database_path: dir
                .path()
                .join("patter-test.db")
                .to_string_lossy()
                .into_owned(),
        };
        let store = SqliteTranscriptStore::open(&config)
            .await
            .expect("open temp store");
        Self {
            store: Arc::new(store),
            _dir: dir,
        }
    }

    /// The concrete store, for APIs outside the trait (write-order reads).
    pub fn inner(&self) -> &SqliteTranscriptStore {
        &self.store
    }

    /// The store as a shareable trait object.
    pub fn arc(&self) -> Arc<dyn TranscriptStore> {
        self.store.clone()
    }

    /// Create a conversation with no transcript entries at all. The
    /// pipeline treats such a conversation as not-found.
    pub async fn create_bare_conversation(
        &self,
        display_name: &str,
        backend: BackendKind,
    ) -> ConversationId {
        let id = ConversationId(Uuid::new_v4().to_string());
        let now = now_millis();
        self.store
            .create_conversation(&Conversation {
                id: id.clone(),
                display_name: display_name.to_string(),
                backend,
                last_message: None,
                unread: false,
                total_messages: 0,
                created_at: now.clone(),
                updated_at: now,
            })
            .await
            .expect("create conversation");
        id
    }
}

/// Seed a conversation the way the creator does: the conversation record
/// plus two agent-authored opener entries written synchronously. Opener
/// entries carry no generation metadata.
pub async fn seed_conversation(
    store: &TempStore,
    agent_name: &str,
    display_name: &str,
    backend: BackendKind,
) -> ConversationId {
    let id = ConversationId(Uuid::new_v4().to_string());
    let now = now_millis();
    let openers = [
        format!("Thanks for the follow {display_name}!"),
        "Are you here for the content or do you have questions about care?".to_string(),
    ];

    store
        .store
        .create_conversation(&Conversation {
            id: id.clone(),
            display_name: display_name.to_string(),
            backend,
            last_message: Some(openers[1].clone()),
            unread: false,
            total_messages: openers.len() as i64,
            created_at: now.clone(),
            updated_at: now.clone(),
        })
        .await
        .expect("create conversation");

    for text in openers {
        store
            .store
            .append_entry(&TranscriptEntry {
                id: EntryId(Uuid::new_v4().to_string()),
                conversation_id: id.clone(),
                sender: agent_name.to_string(),
                text,
                timestamp: now_millis(),
                agent: None,
            })
            .await
            .expect("seed opener entry");
    }

    id
}

/// Append a counterpart turn, as the UI shell would before invoking the
/// pipeline.
pub async fn append_counterpart_message(
    store: &TempStore,
    id: &ConversationId,
    sender: &str,
    text: &str,
) {
    store
        .store
        .append_entry(&TranscriptEntry {
            id: EntryId(Uuid::new_v4().to_string()),
            conversation_id: id.clone(),
            sender: sender.to_string(),
            text: text.to_string(),
            timestamp: now_millis(),
            agent: None,
        })
        .await
        .expect("append counterpart entry");
}

fn now_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
