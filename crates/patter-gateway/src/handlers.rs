// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles POST /v1/conversations/{id}/respond and GET /health.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::warn;

use patter_core::{HealthStatus, PipelineError, TranscriptStore};

use crate::server::GatewayState;

/// Error response body: the stable wire code plus a human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub error: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ok" or "degraded".
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
    /// Storage health detail, when not healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<String>,
}

/// POST /v1/conversations/{id}/respond
///
/// Runs one pipeline invocation for the conversation and returns the
/// aggregate generation result. Every pipeline error maps onto a distinct
/// status code via its wire code.
pub async fn post_respond(
    State(state): State<GatewayState>,
    Path(conversation_id): Path<String>,
) -> Response {
    match state.pipeline.respond_to(&conversation_id).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => {
            warn!(conversation = %conversation_id, code = err.code(), error = %err, "respond failed");
            error_response(&err).into_response()
        }
    }
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Response {
    let (status, storage) = match state.store.health_check().await {
        Ok(HealthStatus::Healthy) => ("ok", None),
        Ok(HealthStatus::Degraded(detail)) | Ok(HealthStatus::Unhealthy(detail)) => {
            ("degraded", Some(detail))
        }
        Err(err) => ("degraded", Some(err.to_string())),
    };

    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        storage,
    };
    let code = if status == "ok" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(body)).into_response()
}

/// Maps a pipeline error onto its HTTP status and wire body.
pub fn error_response(err: &PipelineError) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        PipelineError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        PipelineError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
        PipelineError::NotFound(_) => StatusCode::NOT_FOUND,
        PipelineError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorResponse {
            code: err.code().to_string(),
            error: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_mapping_covers_the_taxonomy() {
        let cases = [
            (
                PipelineError::InvalidArgument("id".into()),
                StatusCode::BAD_REQUEST,
                "invalid-argument",
            ),
            (
                PipelineError::PreconditionFailed("key".into()),
                StatusCode::PRECONDITION_FAILED,
                "failed-precondition",
            ),
            (
                PipelineError::NotFound("conv".into()),
                StatusCode::NOT_FOUND,
                "not-found",
            ),
            (
                PipelineError::internal("boom"),
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal",
            ),
        ];

        for (err, expected_status, expected_code) in cases {
            let (status, Json(body)) = error_response(&err);
            assert_eq!(status, expected_status);
            assert_eq!(body.code, expected_code);
            assert!(!body.error.is_empty());
        }
    }
}
