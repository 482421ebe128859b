// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Patter - a human-paced DM agent response service.
//!
//! This is the binary entry point for the Patter agent.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use patter_core::BackendKind;

mod bootstrap;
mod respond;
mod seed;
mod serve;

/// Patter - a human-paced DM agent response service.
#[derive(Parser, Debug)]
#[command(name = "patter", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Patter gateway server.
    Serve,
    /// Create a conversation with its two opener messages.
    Seed {
        /// Display name of the counterpart.
        display_name: String,
        /// Backend variant for this conversation ("free-text" or
        /// "structured"). Defaults to agent.default_backend.
        #[arg(long)]
        backend: Option<BackendKind>,
    },
    /// Generate and persist the agent's next reply batch for a conversation.
    Respond {
        /// Conversation id to respond in.
        conversation_id: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match patter_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            patter_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    bootstrap::init_tracing(&config.agent.log_level);

    let outcome = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Seed {
            display_name,
            backend,
        }) => seed::run_seed(config, &display_name, backend).await,
        Some(Commands::Respond { conversation_id }) => {
            respond::run_respond(config, &conversation_id).await
        }
        None => {
            println!("patter: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = outcome {
        eprintln!("error ({}): {err}", err.code());
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this; the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_seed_with_backend_override() {
        let cli = Cli::parse_from(["patter", "seed", "Caty", "--backend", "structured"]);
        match cli.command {
            Some(Commands::Seed {
                display_name,
                backend,
            }) => {
                assert_eq!(display_name, "Caty");
                assert_eq!(backend, Some(BackendKind::Structured));
            }
            other => panic!("expected seed command, got {other:?}"),
        }
    }

    #[test]
    fn cli_parses_respond() {
        let cli = Cli::parse_from(["patter", "respond", "c-123"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Respond { conversation_id }) if conversation_id == "c-123"
        ));
    }

    #[test]
    fn default_config_string_is_valid() {
        let config = patter_config::load_and_validate_str("").expect("defaults are valid");
        assert_eq!(config.agent.display_name, "Dr. Reyes");
    }
}
