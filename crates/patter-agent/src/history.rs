// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! History loading: the ordered transcript plus conversation attributes.

use patter_core::{Conversation, ConversationId, PipelineError, TranscriptEntry, TranscriptStore};

/// Loads the conversation record and its full transcript in ascending time
/// order.
///
/// Fails with `NotFound` when the conversation does not exist or when its
/// transcript is empty -- the agent cannot respond to nothing. No side
/// effects.
pub async fn load_history(
    store: &dyn TranscriptStore,
    id: &ConversationId,
) -> Result<(Conversation, Vec<TranscriptEntry>), PipelineError> {
    let conversation = store
        .get_conversation(id)
        .await?
        .ok_or_else(|| PipelineError::NotFound(format!("conversation {} not found", id.0)))?;

    let transcript = store.list_entries(id).await?;
    if transcript.is_empty() {
        return Err(PipelineError::NotFound(format!(
            "no messages found for conversation {}",
            id.0
        )));
    }

    Ok((conversation, transcript))
}

#[cfg(test)]
mod tests {
    use patter_core::BackendKind;
    use patter_test_utils::harness::{TempStore, seed_conversation};

    use super::*;

    #[tokio::test]
    async fn loads_conversation_and_ordered_transcript() {
        let store = TempStore::open().await;
        let id = seed_conversation(&store, "Dr. Reyes", "Caty", BackendKind::FreeText).await;

        let (conversation, transcript) = load_history(store.inner(), &id).await.unwrap();
        assert_eq!(conversation.display_name, "Caty");
        assert_eq!(transcript.len(), 2);
        assert!(transcript[0].timestamp <= transcript[1].timestamp);
    }

    #[tokio::test]
    async fn missing_conversation_is_not_found() {
        let store = TempStore::open().await;
        let err = load_history(store.inner(), &ConversationId("ghost".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "not-found");
    }

    #[tokio::test]
    async fn empty_transcript_is_not_found() {
        let store = TempStore::open().await;
        let id = store
            .create_bare_conversation("Caty", BackendKind::FreeText)
            .await;
        let err = load_history(store.inner(), &id).await.unwrap_err();
        assert_eq!(err.code(), "not-found");
        assert!(err.to_string().contains("no messages"));
    }
}
