// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `patter seed` command implementation.
//!
//! Creates a conversation the way the external creator does: one
//! conversation record plus two agent-authored opener entries, written
//! synchronously. The pipeline itself never creates conversations.

use chrono::{SecondsFormat, Utc};
use tracing::info;
use uuid::Uuid;

use patter_config::PatterConfig;
use patter_core::{
    BackendKind, Conversation, ConversationId, EntryId, PipelineError, TranscriptEntry,
    TranscriptStore,
};
use patter_storage::SqliteTranscriptStore;

/// Runs the `patter seed <display-name>` command and prints the new
/// conversation id.
pub async fn run_seed(
    config: PatterConfig,
    display_name: &str,
    backend: Option<BackendKind>,
) -> Result<(), PipelineError> {
    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(PipelineError::InvalidArgument(
            "display name is required".into(),
        ));
    }

    let store = SqliteTranscriptStore::open(&config.storage).await?;
    let backend = backend.unwrap_or(config.agent.default_backend);
    let agent_name = &config.agent.display_name;

    let id = ConversationId(Uuid::new_v4().to_string());
    let now = now_millis();
    let openers = [
        format!("Thanks for the follow {display_name}!"),
        "Are you here for the content or do you have questions about care?".to_string(),
    ];

    store
        .create_conversation(&Conversation {
            id: id.clone(),
            display_name: display_name.to_string(),
            backend,
            last_message: Some(openers[1].clone()),
            unread: false,
            total_messages: openers.len() as i64,
            created_at: now.clone(),
            updated_at: now,
        })
        .await?;

    for text in openers {
        store
            .append_entry(&TranscriptEntry {
                id: EntryId(Uuid::new_v4().to_string()),
                conversation_id: id.clone(),
                sender: agent_name.clone(),
                text,
                timestamp: now_millis(),
                agent: None,
            })
            .await?;
    }

    info!(conversation = %id.0, backend = %backend, "conversation seeded");
    println!("{}", id.0);

    store.close().await
}

fn now_millis() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
