// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock LLM backend for deterministic testing.
//!
//! `MockBackend` implements `ResponseBackend` with pre-configured outputs,
//! enabling fast, CI-runnable tests without external API calls. Every
//! invocation is counted so tests can assert that failing preconditions
//! reach zero backend calls.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use secrecy::SecretString;

use patter_core::{
    AssembledPrompt, BackendKind, NextAction, PipelineError, RawOutput, ResponseBackend,
    StructuredMessage, StructuredReply,
};

/// A mock backend that returns pre-configured raw outputs.
///
/// Outputs are popped from a FIFO queue; when the queue is empty, a default
/// output matching the backend's kind is returned. `failing_with` makes
/// every call fail instead.
pub struct MockBackend {
    kind: BackendKind,
    model: String,
    outputs: Mutex<VecDeque<RawOutput>>,
    failure: Option<String>,
    calls: AtomicUsize,
}

impl MockBackend {
    /// A mock for the free-text variant.
    pub fn free_text() -> Self {
        Self::new(BackendKind::FreeText, "mock-free-text")
    }

    /// A mock for the structured variant.
    pub fn structured() -> Self {
        Self::new(BackendKind::Structured, "mock-structured")
    }

    fn new(kind: BackendKind, model: &str) -> Self {
        Self {
            kind,
            model: model.to_string(),
            outputs: Mutex::new(VecDeque::new()),
            failure: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Pre-load the output queue.
    pub fn with_outputs(self, outputs: Vec<RawOutput>) -> Self {
        *self.outputs.lock().expect("outputs lock") = VecDeque::from(outputs);
        self
    }

    /// Make every generation call fail with an internal error.
    pub fn failing_with(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    /// Append an output to the queue.
    pub fn add_output(&self, output: RawOutput) {
        self.outputs.lock().expect("outputs lock").push_back(output);
    }

    /// How many times `generate` has been invoked.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn default_output(&self) -> RawOutput {
        match self.kind {
            BackendKind::FreeText => RawOutput::FreeText("mock response".to_string()),
            BackendKind::Structured => RawOutput::Structured(StructuredReply {
                analysis: "mock analysis".to_string(),
                messages: vec![StructuredMessage {
                    text: "mock response".to_string(),
                    phase: Some("DISCOVERY".to_string()),
                    response_delay_seconds: Some(5.0),
                    approval_required: Some(false),
                    confidence_score: Some(0.5),
                }],
                next_action: NextAction {
                    should_offer_scheduling_link: false,
                    notes: "mock notes".to_string(),
                },
            }),
        }
    }
}

#[async_trait]
impl ResponseBackend for MockBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        _credential: &SecretString,
        _prompt: &AssembledPrompt,
    ) -> Result<RawOutput, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.failure {
            return Err(PipelineError::internal(message.clone()));
        }

        let next = self.outputs.lock().expect("outputs lock").pop_front();
        Ok(next.unwrap_or_else(|| self.default_output()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt() -> AssembledPrompt {
        AssembledPrompt {
            system_prompt: "system".into(),
            user_prompt: "user".into(),
        }
    }

    fn key() -> SecretString {
        SecretString::from("sk-test")
    }

    #[tokio::test]
    async fn queued_outputs_return_in_order_then_default() {
        let backend = MockBackend::free_text().with_outputs(vec![
            RawOutput::FreeText("first".into()),
            RawOutput::FreeText("second".into()),
        ]);

        assert_eq!(
            backend.generate(&key(), &prompt()).await.unwrap(),
            RawOutput::FreeText("first".into())
        );
        assert_eq!(
            backend.generate(&key(), &prompt()).await.unwrap(),
            RawOutput::FreeText("second".into())
        );
        // Queue exhausted, falls back to default.
        assert_eq!(
            backend.generate(&key(), &prompt()).await.unwrap(),
            RawOutput::FreeText("mock response".into())
        );
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test]
    async fn structured_default_satisfies_the_schema_bounds() {
        let backend = MockBackend::structured();
        let output = backend.generate(&key(), &prompt()).await.unwrap();
        let RawOutput::Structured(reply) = output else {
            panic!("expected structured output");
        };
        assert_eq!(reply.messages.len(), 1);
    }

    #[tokio::test]
    async fn failing_backend_counts_calls() {
        let backend = MockBackend::free_text().failing_with("boom");
        let err = backend.generate(&key(), &prompt()).await.unwrap_err();
        assert_eq!(err.code(), "internal");
        assert_eq!(backend.calls(), 1);
    }
}
