// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared across the Patter workspace.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::PipelineError;

/// Unique identifier for a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Unique identifier for a transcript entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub String);

/// Which backend variant a conversation is configured to use.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// Completion endpoint returning delimited free text.
    FreeText,
    /// Schema-constrained structured generation.
    Structured,
}

/// Conversation stage assigned by the structured backend to each message.
///
/// The set is fixed and ordered; free-text output carries no phase signal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    InitialContact,
    Discovery,
    Qualification,
    Connection,
    Positioning,
    Conversion,
}

/// A persistent thread between the agent and one counterpart.
///
/// The summary fields (`last_message`, `unread`, `total_messages`) belong to
/// the out-of-scope summary trigger; the pipeline reads this record and never
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    /// Display name of the counterpart.
    pub display_name: String,
    /// Selected backend variant for this conversation.
    pub backend: BackendKind,
    pub last_message: Option<String>,
    pub unread: bool,
    pub total_messages: i64,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
    /// RFC 3339 last-update timestamp.
    pub updated_at: String,
}

/// Generation metadata carried only by agent-authored transcript entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    /// Artificial pacing delay, clamped to 5-60 seconds.
    pub response_delay_seconds: i64,
    /// RFC 3339 timestamp at which the message should appear sent.
    /// Non-decreasing across one generation batch.
    pub respond_at: String,
    pub approval_required: bool,
    /// Confidence in [0, 1], rounded to two decimals.
    pub confidence_score: f64,
    pub phase: Option<Phase>,
    /// Identifier of the model that generated this entry.
    pub model: Option<String>,
    /// Batch-level analysis from the structured backend, repeated on every
    /// entry of the batch. Absent on the free-text path.
    pub analysis: Option<String>,
    /// Batch-level next-action hint from the structured backend.
    pub next_action: Option<NextAction>,
}

/// One message within a conversation. Ordered and append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub id: EntryId,
    pub conversation_id: ConversationId,
    /// Either the fixed agent display name or the counterpart name.
    pub sender: String,
    pub text: String,
    /// RFC 3339 wall-clock write timestamp; also the sort key.
    pub timestamp: String,
    /// Present iff the entry is agent-authored.
    pub agent: Option<AgentMetadata>,
}

impl TranscriptEntry {
    /// Whether this entry was authored by the agent identity `agent_name`.
    pub fn is_agent(&self, agent_name: &str) -> bool {
        self.sender == agent_name
    }
}

/// Next-action hint produced by the structured backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextAction {
    pub should_offer_scheduling_link: bool,
    pub notes: String,
}

/// One message object inside a structured backend reply.
///
/// Field types are deliberately loose (`Option<f64>`, `Option<String>`); the
/// sanitizer owns defaulting and clamping, so a backend that drifts from its
/// schema degrades instead of panicking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredMessage {
    pub text: String,
    #[serde(default)]
    pub phase: Option<String>,
    #[serde(default)]
    pub response_delay_seconds: Option<f64>,
    #[serde(default)]
    pub approval_required: Option<bool>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
}

/// The full parsed object returned by the structured backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredReply {
    pub analysis: String,
    pub messages: Vec<StructuredMessage>,
    pub next_action: NextAction,
}

/// Raw output of a backend, normalized by the response segmenter.
///
/// A single tagged variant keeps one segmenter for both backend shapes
/// instead of duplicating the pipeline per backend.
#[derive(Debug, Clone, PartialEq)]
pub enum RawOutput {
    FreeText(String),
    Structured(StructuredReply),
}

/// The two strings a backend needs for one generation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Aggregate result of one pipeline invocation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    /// The first generated message, duplicated for convenience.
    pub message: String,
    /// All generated message texts, in persistence order.
    pub all_messages: Vec<String>,
    pub conversation_id: ConversationId,
    /// RFC 3339 completion timestamp.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_action: Option<NextAction>,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

/// Per-backend API credentials, threaded explicitly into each generation
/// call. Nothing in the pipeline reads ambient process state for secrets;
/// this keeps the pipeline testable with fake credentials and avoids hidden
/// initialization-order dependencies.
#[derive(Default)]
pub struct Credentials {
    pub anthropic: Option<SecretString>,
    pub openai: Option<SecretString>,
}

impl Credentials {
    /// Returns the credential required by `kind`, or `PreconditionFailed`
    /// when it is not provisioned. Called before any network I/O.
    pub fn require(&self, kind: BackendKind) -> Result<&SecretString, PipelineError> {
        let (slot, label) = match kind {
            BackendKind::FreeText => (&self.anthropic, "Anthropic"),
            BackendKind::Structured => (&self.openai, "OpenAI"),
        };
        slot.as_ref().ok_or_else(|| {
            PipelineError::PreconditionFailed(format!("{label} API key not configured"))
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("anthropic", &self.anthropic.as_ref().map(|_| "<redacted>"))
            .field("openai", &self.openai.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
