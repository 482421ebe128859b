// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `patter serve` command implementation.
//!
//! Assembles the pipeline from configuration and serves the HTTP gateway
//! until the process is stopped.

use std::time::Instant;

use tracing::info;

use patter_config::PatterConfig;
use patter_core::PipelineError;
use patter_gateway::{GatewayState, ServerConfig, start_server};

use crate::bootstrap;

/// Runs the `patter serve` command.
pub async fn run_serve(config: PatterConfig) -> Result<(), PipelineError> {
    info!("starting patter serve");

    let (store, pipeline) = bootstrap::build_pipeline(&config).await?;

    let state = GatewayState {
        pipeline,
        store,
        start_time: Instant::now(),
    };
    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };

    start_server(&server_config, state).await
}
