// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenAI chat completions API.
//!
//! Mirrors the free-text client's contract: one attempt per invocation, no
//! retry loop, credential threaded per call.

use std::time::Duration;

use patter_core::PipelineError;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Base URL for the OpenAI chat completions API.
const API_BASE_URL: &str = "https://api.openai.com/v1/chat/completions";

/// HTTP client for OpenAI API communication.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI API client. No credential is taken here; it is
    /// threaded into each request instead.
    pub fn new() -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| PipelineError::wrap("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one chat completion request and returns the full response.
    pub async fn complete_chat(
        &self,
        api_key: &SecretString,
        request: &ChatRequest,
    ) -> Result<ChatResponse, PipelineError> {
        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::wrap("HTTP request to OpenAI failed", e))?;

        let status = response.status();
        debug!(status = %status, "chat completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::wrap("failed to read OpenAI response body", e))?;

        if !status.is_success() {
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!("OpenAI API error: {}", api_err.error.message)
            } else {
                format!("OpenAI API returned {status}: {body}")
            };
            return Err(PipelineError::internal(message));
        }

        serde_json::from_str(&body)
            .map_err(|e| PipelineError::wrap("failed to parse OpenAI response", e))
    }
}
