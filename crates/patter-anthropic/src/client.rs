// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! One attempt per invocation: the pipeline treats every backend failure as
//! request-scoped and leaves retries to its own caller, so this client
//! carries no retry loop. The API key is supplied per call, never stored.

use std::time::Duration;

use patter_core::PipelineError;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Base URL for the Anthropic Messages API.
const API_BASE_URL: &str = "https://api.anthropic.com/v1/messages";

/// HTTP client for Anthropic API communication.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_version: String,
    base_url: String,
}

impl AnthropicClient {
    /// Creates a new Anthropic API client.
    ///
    /// `api_version` is the version header value (e.g., "2023-06-01"). No
    /// credential is taken here; it is threaded into each request instead.
    pub fn new(api_version: String) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(|e| PipelineError::wrap("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            api_version,
            base_url: API_BASE_URL.to_string(),
        })
    }

    /// Overrides the base URL (for testing with wiremock).
    #[cfg(test)]
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = url;
        self
    }

    /// Sends one completion request and returns the full response.
    pub async fn complete_message(
        &self,
        api_key: &SecretString,
        request: &MessageRequest,
    ) -> Result<MessageResponse, PipelineError> {
        let response = self
            .client
            .post(&self.base_url)
            .header("x-api-key", api_key.expose_secret())
            .header("anthropic-version", &self.api_version)
            .json(request)
            .send()
            .await
            .map_err(|e| PipelineError::wrap("HTTP request to Anthropic failed", e))?;

        let status = response.status();
        debug!(status = %status, "completion response received");

        let body = response
            .text()
            .await
            .map_err(|e| PipelineError::wrap("failed to read Anthropic response body", e))?;

        if !status.is_success() {
            let message = if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&body) {
                format!(
                    "Anthropic API error ({}): {}",
                    api_err.error.type_, api_err.error.message
                )
            } else {
                format!("Anthropic API returned {status}: {body}")
            };
            return Err(PipelineError::internal(message));
        }

        serde_json::from_str(&body)
            .map_err(|e| PipelineError::wrap("failed to parse Anthropic response", e))
    }
}
