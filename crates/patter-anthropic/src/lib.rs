// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic free-text backend adapter for the Patter agent.
//!
//! This crate implements [`ResponseBackend`] for the Anthropic Messages API.
//! The output contract is free-form text that optionally contains exactly one
//! `<response>...</response>` block; parsing that block belongs to the
//! response segmenter, not this adapter.

pub mod client;
pub mod types;

use async_trait::async_trait;
use patter_config::model::AnthropicConfig;
use patter_core::{
    AssembledPrompt, BackendKind, PipelineError, RawOutput, ResponseBackend,
};
use secrecy::SecretString;
use tracing::debug;

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest, ResponseContentBlock};

/// Anthropic backend producing [`RawOutput::FreeText`].
pub struct AnthropicBackend {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl AnthropicBackend {
    /// Creates the backend from configuration. The API key is deliberately
    /// not part of construction; it is threaded into each [`generate`] call.
    ///
    /// [`generate`]: ResponseBackend::generate
    pub fn new(config: &AnthropicConfig) -> Result<Self, PipelineError> {
        let client = AnthropicClient::new(config.api_version.clone())?;
        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    #[cfg(test)]
    fn with_client(client: AnthropicClient, config: &AnthropicConfig) -> Self {
        Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    fn to_message_request(&self, prompt: &AssembledPrompt) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user".to_string(),
                content: prompt.user_prompt.clone(),
            }],
            system: Some(prompt.system_prompt.clone()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl ResponseBackend for AnthropicBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::FreeText
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        credential: &SecretString,
        prompt: &AssembledPrompt,
    ) -> Result<RawOutput, PipelineError> {
        let request = self.to_message_request(prompt);
        let response = self.client.complete_message(credential, &request).await?;

        let text = response
            .content
            .iter()
            .map(|block| match block {
                ResponseContentBlock::Text { text } => text.as_str(),
            })
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(PipelineError::internal("empty response from AI service"));
        }

        debug!(model = %response.model, chars = text.len(), "free-text generation complete");
        Ok(RawOutput::FreeText(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config() -> AnthropicConfig {
        AnthropicConfig::default()
    }

    fn test_backend(base_url: &str) -> AnthropicBackend {
        let client = AnthropicClient::new("2023-06-01".into())
            .unwrap()
            .with_base_url(base_url.to_string());
        AnthropicBackend::with_client(client, &test_config())
    }

    fn test_prompt() -> AssembledPrompt {
        AssembledPrompt {
            system_prompt: "You are an outreach agent.".into(),
            user_prompt: "Generate the next reply.".into(),
        }
    }

    fn message_body(blocks: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "content": blocks,
            "model": "claude-sonnet-4-20250514",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 12, "output_tokens": 9}
        })
    }

    #[test]
    fn request_carries_fixed_sampling_parameters() {
        let backend = test_backend("http://unused");
        let request = backend.to_message_request(&test_prompt());
        assert_eq!(request.temperature, 1.0);
        assert_eq!(request.max_tokens, 20_000);
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.messages[0].role, "user");
        assert_eq!(request.system.as_deref(), Some("You are an outreach agent."));
    }

    #[tokio::test]
    async fn generate_returns_free_text_output() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_partial_json(serde_json::json!({
                "model": "claude-sonnet-4-20250514",
                "temperature": 1.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(message_body(
                serde_json::json!([{"type": "text", "text": "<response>Great question|||Both</response>"}]),
            )))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let output = backend
            .generate(&SecretString::from("sk-test"), &test_prompt())
            .await
            .unwrap();
        assert_eq!(
            output,
            RawOutput::FreeText("<response>Great question|||Both</response>".to_string())
        );
    }

    #[tokio::test]
    async fn multiple_text_blocks_are_concatenated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(message_body(
                serde_json::json!([
                    {"type": "text", "text": "<response>Per"},
                    {"type": "text", "text": "fect</response>"}
                ]),
            )))
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let output = backend
            .generate(&SecretString::from("sk-test"), &test_prompt())
            .await
            .unwrap();
        assert_eq!(
            output,
            RawOutput::FreeText("<response>Perfect</response>".to_string())
        );
    }

    #[tokio::test]
    async fn empty_content_fails_closed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(message_body(serde_json::json!([]))),
            )
            .mount(&server)
            .await;

        let backend = test_backend(&server.uri());
        let err = backend
            .generate(&SecretString::from("sk-test"), &test_prompt())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "internal");
        assert!(err.to_string().contains("empty response"));
    }

    #[test]
    fn backend_reports_its_kind_and_model() {
        let backend = test_backend("http://unused");
        assert_eq!(backend.kind(), BackendKind::FreeText);
        assert_eq!(backend.model(), "claude-sonnet-4-20250514");
    }
}
