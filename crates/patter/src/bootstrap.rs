// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared startup wiring: tracing, credentials, storage, and the pipeline.

use std::sync::Arc;

use secrecy::SecretString;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use patter_agent::ResponsePipeline;
use patter_anthropic::AnthropicBackend;
use patter_config::PatterConfig;
use patter_core::{Credentials, PipelineError};
use patter_openai::OpenAiBackend;
use patter_storage::SqliteTranscriptStore;

/// Initialize the tracing subscriber. `RUST_LOG` overrides the configured
/// level when set.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve per-backend credentials once, at startup.
///
/// Resolution order per backend: config value, then the conventional
/// environment variable. Absence is not an error here -- the pipeline raises
/// `PreconditionFailed` only when a conversation actually selects the
/// unprovisioned backend.
pub fn resolve_credentials(config: &PatterConfig) -> Credentials {
    let credentials = Credentials {
        anthropic: resolve_key(&config.anthropic.api_key, "ANTHROPIC_API_KEY"),
        openai: resolve_key(&config.openai.api_key, "OPENAI_API_KEY"),
    };
    debug!(
        anthropic = credentials.anthropic.is_some(),
        openai = credentials.openai.is_some(),
        "credentials resolved"
    );
    credentials
}

fn resolve_key(config_key: &Option<String>, env_var: &str) -> Option<SecretString> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Some(SecretString::from(key.clone()));
    }
    std::env::var(env_var).ok().filter(|k| !k.is_empty()).map(SecretString::from)
}

/// Open storage and assemble the response pipeline from configuration.
pub async fn build_pipeline(
    config: &PatterConfig,
) -> Result<(Arc<SqliteTranscriptStore>, Arc<ResponsePipeline>), PipelineError> {
    let store = Arc::new(SqliteTranscriptStore::open(&config.storage).await?);

    let free_text = Arc::new(AnthropicBackend::new(&config.anthropic)?);
    let structured = Arc::new(OpenAiBackend::new(&config.openai)?);
    let credentials = resolve_credentials(config);

    let pipeline = Arc::new(ResponsePipeline::new(
        store.clone(),
        free_text,
        structured,
        credentials,
        config.agent.display_name.clone(),
    ));

    info!(
        agent = %config.agent.display_name,
        database = %config.storage.database_path,
        "pipeline assembled"
    );
    Ok((store, pipeline))
}
