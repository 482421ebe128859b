// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI structured backend adapter for the Patter agent.
//!
//! This crate implements [`ResponseBackend`] for the OpenAI chat completions
//! API with a strict declared output schema. The contract fails closed: when
//! the backend returns no parseable structured object, or a message count
//! outside the declared 1-4 bounds, the call is an internal error -- never an
//! empty list.

pub mod client;
pub mod schema;
pub mod types;

use async_trait::async_trait;
use patter_config::model::OpenAiConfig;
use patter_core::{
    AssembledPrompt, BackendKind, PipelineError, RawOutput, ResponseBackend, StructuredReply,
};
use secrecy::SecretString;
use tracing::debug;

use crate::client::OpenAiClient;
use crate::types::{ChatMessage, ChatRequest};

/// OpenAI backend producing [`RawOutput::Structured`].
pub struct OpenAiBackend {
    client: OpenAiClient,
    model: String,
    temperature: f64,
}

impl OpenAiBackend {
    /// Creates the backend from configuration. The API key is deliberately
    /// not part of construction; it is threaded into each [`generate`] call.
    ///
    /// [`generate`]: ResponseBackend::generate
    pub fn new(config: &OpenAiConfig) -> Result<Self, PipelineError> {
        let client = OpenAiClient::new()?;
        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    #[cfg(test)]
    fn with_client(client: OpenAiClient, config: &OpenAiConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    fn to_chat_request(&self, prompt: &AssembledPrompt) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system_prompt.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.user_prompt.clone(),
                },
            ],
            temperature: self.temperature,
            response_format: schema::response_format(),
        }
    }
}

#[async_trait]
impl ResponseBackend for OpenAiBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Structured
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        credential: &SecretString,
        prompt: &AssembledPrompt,
    ) -> Result<RawOutput, PipelineError> {
        let request = self.to_chat_request(prompt);
        let response = self.client.complete_chat(credential, &request).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| PipelineError::internal("no choices in structured response"))?;

        if let Some(refusal) = &choice.message.refusal {
            return Err(PipelineError::internal(format!(
                "structured backend refused: {refusal}"
            )));
        }

        let content = choice
            .message
            .content
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| PipelineError::internal("no structured output from backend"))?;

        let reply: StructuredReply = serde_json::from_str(content).map_err(|e| {
            PipelineError::wrap("structured output does not match the declared schema", e)
        })?;

        // The schema declares 1-4 messages; anything else is a contract
        // violation by the backend, not a normal "nothing to say" case.
        if reply.messages.is_empty() || reply.messages.len() > schema::MAX_MESSAGES {
            return Err(PipelineError::internal(format!(
                "structured backend returned {} messages, expected 1-{}",
                reply.messages.len(),
                schema::MAX_MESSAGES
            )));
        }

        debug!(
            model = %response.model,
            messages = reply.messages.len(),
            "structured generation complete"
        );
        Ok(RawOutput::Structured(reply))
    }
}
