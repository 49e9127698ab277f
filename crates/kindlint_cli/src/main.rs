//! kindlint CLI
//!
//! Considerate-language linter for prose, usable from the command line or as
//! a language server.

mod cli;
mod commands;
mod output;
mod utils;

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::lint::run_lint;
use crate::commands::lsp::run_lsp;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries results or the LSP transport
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_problems) => {
            if has_problems {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Lint { files, format } => run_lint(&cli, files, *format),
        Commands::Lsp => run_lsp().map(|_| false),
    }
}
