// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports the XDG hierarchy: `./patter.toml` > `~/.config/patter/patter.toml`
//! > `/etc/patter/patter.toml` with environment variable overrides via the
//! `PATTER_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PatterConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/patter/patter.toml` (system-wide)
/// 3. `~/.config/patter/patter.toml` (user XDG config)
/// 4. `./patter.toml` (local directory)
/// 5. `PATTER_*` environment variables
pub fn load_config() -> Result<PatterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PatterConfig::default()))
        .merge(Toml::file("/etc/patter/patter.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("patter/patter.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("patter.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<PatterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PatterConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PatterConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PatterConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `PATTER_AGENT_DISPLAY_NAME` must map to
/// `agent.display_name`, not `agent.display.name`.
fn env_provider() -> Env {
    Env::prefixed("PATTER_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: PATTER_AGENT_DISPLAY_NAME -> "agent_display_name"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("openai_", "openai.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1);
        mapped.into()
    })
}
