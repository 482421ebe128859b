// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Backend adapter trait for LLM provider integrations.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::PipelineError;
use crate::types::{AssembledPrompt, BackendKind, RawOutput};

/// Adapter for LLM backend integrations.
///
/// A backend owns exactly one generation strategy: the free-text variant
/// returns delimited text, the structured variant returns a schema-validated
/// object. Both shapes are carried by [`RawOutput`] so a single segmenter can
/// normalize them.
///
/// Backends make a single attempt per invocation -- no retry, no backoff.
/// Any failure is request-scoped; the caller decides whether to retry the
/// whole pipeline.
#[async_trait]
pub trait ResponseBackend: Send + Sync {
    /// Which output shape this backend produces.
    fn kind(&self) -> BackendKind;

    /// Identifier of the model this backend calls, recorded on persisted
    /// entries.
    fn model(&self) -> &str;

    /// Sends one generation request and returns the raw output.
    ///
    /// The credential is threaded in per call rather than read from ambient
    /// state; callers verify it exists before invoking this method.
    async fn generate(
        &self,
        credential: &SecretString,
        prompt: &AssembledPrompt,
    ) -> Result<RawOutput, PipelineError>;
}
