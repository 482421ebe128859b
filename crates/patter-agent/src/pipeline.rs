// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Pipeline orchestration: one conversational turn in, one persisted batch
//! of agent messages out.
//!
//! Every stage is synchronous relative to the invocation; the only
//! suspension points are the model call and each transcript append. Nothing
//! is retried, no lock is taken on the conversation, and a partial batch is
//! not rolled back when a later append fails -- entries already written
//! remain and the error surfaces after the failure point.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use patter_core::{
    AgentMetadata, BackendKind, Conversation, ConversationId, Credentials, EntryId,
    GenerationResult, NextAction, PipelineError, RawOutput, ResponseBackend, TranscriptEntry,
    TranscriptStore,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::schedule::ScheduledMessage;
use crate::{history, prompt, sanitize, schedule, segment};

/// The agent response pipeline.
///
/// Holds the transcript store, one backend per variant, and the credentials
/// threaded into each generation call. Stateless across invocations; safe to
/// share behind an `Arc`.
pub struct ResponsePipeline {
    store: Arc<dyn TranscriptStore>,
    free_text: Arc<dyn ResponseBackend>,
    structured: Arc<dyn ResponseBackend>,
    credentials: Credentials,
    agent_name: String,
}

impl ResponsePipeline {
    pub fn new(
        store: Arc<dyn TranscriptStore>,
        free_text: Arc<dyn ResponseBackend>,
        structured: Arc<dyn ResponseBackend>,
        credentials: Credentials,
        agent_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            free_text,
            structured,
            credentials,
            agent_name: agent_name.into(),
        }
    }

    /// The fixed identity the agent signs its entries with.
    pub fn agent_name(&self) -> &str {
        &self.agent_name
    }

    fn backend_for(&self, kind: BackendKind) -> &Arc<dyn ResponseBackend> {
        match kind {
            BackendKind::FreeText => &self.free_text,
            BackendKind::Structured => &self.structured,
        }
    }

    /// Turns one incoming conversational turn into a persisted, human-paced
    /// batch of agent messages.
    ///
    /// Stages: history load -> prompt assembly -> generation -> segmentation
    /// -> sanitization -> scheduling -> sequential persistence. The
    /// credential check happens before any network call.
    pub async fn respond_to(&self, conversation_id: &str) -> Result<GenerationResult, PipelineError> {
        let conversation_id = conversation_id.trim();
        if conversation_id.is_empty() {
            return Err(PipelineError::InvalidArgument(
                "conversation id is required".into(),
            ));
        }
        let id = ConversationId(conversation_id.to_string());

        let (conversation, transcript) = history::load_history(self.store.as_ref(), &id).await?;
        let kind = conversation.backend;
        debug!(
            conversation = %id.0,
            backend = %kind,
            transcript_len = transcript.len(),
            "history loaded"
        );

        // Fail before any network call when the credential is missing.
        let credential = self.credentials.require(kind)?;
        let backend = self.backend_for(kind);

        let prompt = prompt::assemble(
            kind,
            &self.agent_name,
            &conversation.display_name,
            &transcript,
        );
        let output = backend.generate(credential, &prompt).await?;

        let segments = segment::segment(&output)?;
        let sanitized = sanitize::sanitize_batch(segments);
        if sanitized.is_empty() {
            // Only reachable when a structured backend sends all-blank texts;
            // the free-text path substitutes its fallback earlier.
            return Err(PipelineError::internal(
                "sanitization dropped every generated message",
            ));
        }

        let now = Utc::now();
        let scheduled = schedule::schedule(sanitized, now);

        let (analysis, next_action) = match &output {
            RawOutput::Structured(reply) => {
                (Some(reply.analysis.clone()), Some(reply.next_action.clone()))
            }
            RawOutput::FreeText(_) => (None, None),
        };

        let all_messages = self
            .persist_batch(&conversation, &scheduled, backend.model(), &analysis, &next_action)
            .await?;

        info!(
            conversation = %id.0,
            backend = %kind,
            messages = all_messages.len(),
            "generation batch persisted"
        );

        Ok(GenerationResult {
            message: all_messages[0].clone(),
            all_messages,
            conversation_id: id,
            timestamp: rfc3339_millis(Utc::now()),
            analysis,
            next_action,
        })
    }

    /// Appends the batch sequentially, in list order, awaiting each append
    /// before issuing the next. The store does not preserve write order for
    /// concurrent appends, so sequencing here is what makes the transcript's
    /// natural read order match generation order.
    async fn persist_batch(
        &self,
        conversation: &Conversation,
        scheduled: &[ScheduledMessage],
        model: &str,
        analysis: &Option<String>,
        next_action: &Option<NextAction>,
    ) -> Result<Vec<String>, PipelineError> {
        let mut persisted = Vec::with_capacity(scheduled.len());

        for item in scheduled {
            let entry = TranscriptEntry {
                id: EntryId(Uuid::new_v4().to_string()),
                conversation_id: conversation.id.clone(),
                sender: self.agent_name.clone(),
                text: item.message.text.clone(),
                // Real wall-clock write time, distinct from the scheduled
                // respond-at time.
                timestamp: rfc3339_millis(Utc::now()),
                agent: Some(AgentMetadata {
                    response_delay_seconds: item.message.delay_seconds,
                    respond_at: rfc3339_millis(item.respond_at),
                    approval_required: item.message.approval_required,
                    confidence_score: item.message.confidence_score,
                    phase: item.message.phase,
                    model: Some(model.to_string()),
                    analysis: analysis.clone(),
                    next_action: next_action.clone(),
                }),
            };
            self.store.append_entry(&entry).await?;
            persisted.push(entry.text);
        }

        Ok(persisted)
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix, matching the
/// transcript's timestamp format.
pub fn rfc3339_millis(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}
