//! # Quire CLI Entry Point
//!
//! ```text
//! quire totals  <document.json> [--summary]
//! quire replay  <script.json>   [--last]
//! quire check   <document.json> --counterparty <id> [--company <id>]
//! ```

use std::process::ExitCode;

use clap::Parser;

use quire_cli::{init_tracing, run, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(code = ?err.code, "{}", err.message);
            eprintln!("{}", err.to_json());
            ExitCode::FAILURE
        }
    }
}
