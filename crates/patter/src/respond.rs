// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `patter respond` command implementation.
//!
//! Runs one pipeline invocation from the CLI and prints the aggregate
//! result as JSON -- the same shape the gateway returns.

use patter_config::PatterConfig;
use patter_core::PipelineError;

use crate::bootstrap;

/// Runs the `patter respond <conversation-id>` command.
pub async fn run_respond(config: PatterConfig, conversation_id: &str) -> Result<(), PipelineError> {
    let (_store, pipeline) = bootstrap::build_pipeline(&config).await?;

    let result = pipeline.respond_to(conversation_id).await?;
    let rendered = serde_json::to_string_pretty(&result)
        .map_err(|e| PipelineError::wrap("cannot render generation result", e))?;
    println!("{rendered}");
    Ok(())
}
