// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Patter response pipeline.

use thiserror::Error;

/// The primary error type surfaced by the response pipeline.
///
/// Every failure is reported to the caller with a distinct wire code (see
/// [`PipelineError::code`]). Nothing is retried internally; a failure at any
/// stage aborts the remaining stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The request itself is malformed (missing or blank conversation id).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required credential for the selected backend is not provisioned.
    /// Raised before any network call is attempted.
    #[error("failed precondition: {0}")]
    PreconditionFailed(String),

    /// The conversation does not exist, or has no transcript entries yet.
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend returned no usable content, violated its own schema
    /// contract, or an unclassified store/network failure occurred. The
    /// original failure is preserved in `source` for diagnostics.
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl PipelineError {
    /// An internal error with no underlying source.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an unclassified failure, preserving it as the error source.
    pub fn wrap(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// The stable wire code reported to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid-argument",
            Self::PreconditionFailed(_) => "failed-precondition",
            Self::NotFound(_) => "not-found",
            Self::Internal { .. } => "internal",
        }
    }
}
