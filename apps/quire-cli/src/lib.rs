//! # Quire CLI Library
//!
//! The editing shell around `quire-core`: configuration, the editing
//! context, the event-driven document editor and the `quire` subcommands.
//!
//! ## Module Organization
//! ```text
//! quire_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Environment configuration
//! │   ├── context.rs  ◄─── Company and session token
//! │   └── editor.rs   ◄─── Event-driven document editor
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports, JSON loading
//! │   ├── totals.rs   ◄─── Re-price a saved document
//! │   ├── replay.rs   ◄─── Replay editor events
//! │   └── check.rs    ◄─── Submission gate
//! └── error.rs        ◄─── CLI error type
//! ```
//!
//! ## Output
//! Results go to stdout as pretty JSON (or text with `totals --summary`).
//! Errors go to stderr as `{ "code": ..., "message": ... }` with exit code 1.
//! Logs go to stderr through `tracing`.

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use commands::replay::ReplayScript;
use error::CliError;
use quire_core::DocumentDraft;
use state::{EditorContext, QuireConfig};

/// Line-item pricing for Quire invoices and purchase orders.
#[derive(Debug, Parser)]
#[command(name = "quire", version, about)]
pub struct Cli {
    /// Company to work in (overrides QUIRE_COMPANY_ID)
    #[arg(long, global = true)]
    pub company: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Re-price a saved document and print its lines and totals
    Totals {
        /// Document JSON file
        document: PathBuf,

        /// Print a text totals block instead of JSON
        #[arg(long)]
        summary: bool,
    },

    /// Apply a script of editor events and print every intermediate snapshot
    Replay {
        /// Script JSON file: { "document": ..., "events": [...] }
        script: PathBuf,

        /// Print only the final snapshot
        #[arg(long)]
        last: bool,
    },

    /// Run the save-time checks and print the submission request
    Check {
        /// Document JSON file
        document: PathBuf,

        /// Customer (invoice) or vendor (purchase order) id
        #[arg(long)]
        counterparty: Option<String>,
    },
}

/// Runs one parsed command.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. QuireConfig::from_env()      QUIRE_* variables over defaults       │
/// │  2. EditorContext                config + QUIRE_AUTH_TOKEN              │
/// │  3. --company                    overrides the configured company      │
/// │  4. Dispatch to commands/        load JSON, compute, print             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> Result<(), CliError> {
    let config = QuireConfig::from_env()?;
    debug!(?config, "Configuration loaded");

    let mut context = EditorContext::new(config).with_env_token();
    if let Some(company) = cli.company {
        context.select_company(company);
    }

    match cli.command {
        Command::Totals { document, summary } => {
            let draft: DocumentDraft = commands::load_json(&document)?;
            let config = context.config().clone();
            let snapshot = commands::totals::totals(context, draft);
            if summary {
                print!("{}", commands::totals::render_summary(&snapshot, &config));
            } else {
                print_json(&snapshot)?;
            }
        }
        Command::Replay { script, last } => {
            let script: ReplayScript = commands::load_json(&script)?;
            let (steps, draft) = commands::replay::replay(context, script)?;
            if last {
                print_json(&draft.snapshot())?;
            } else {
                print_json(&steps)?;
            }
        }
        Command::Check {
            document,
            counterparty,
        } => {
            let draft: DocumentDraft = commands::load_json(&document)?;
            let request = commands::check::check(context, draft, counterparty.as_deref())?;
            print_json(&request)?;
        }
    }

    info!("Done");
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=quire_cli=trace` - Show trace for the CLI only
/// - Default: INFO, DEBUG for the CLI crate
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,quire_cli=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check() {
        let cli = Cli::try_parse_from([
            "quire",
            "check",
            "inv.json",
            "--counterparty",
            "c-1",
            "--company",
            "acme",
        ])
        .unwrap();

        assert_eq!(cli.company.as_deref(), Some("acme"));
        match cli.command {
            Command::Check { counterparty, .. } => {
                assert_eq!(counterparty.as_deref(), Some("c-1"))
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
