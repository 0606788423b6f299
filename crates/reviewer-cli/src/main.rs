//! Reviewer CLI - Command-line interface
//!
//! Sends source code to the reviewer model and prints the review.

mod cli;
mod commands;
mod errors;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() {
    if let Err(error) = run() {
        let cli_error = match error.downcast::<errors::CliError>() {
            Ok(cli_error) => cli_error,
            Err(error) => errors::from_anyhow(error),
        };
        cli_error.display();
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Initialize tracing; stdout carries the review, so only warnings by default
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Create async runtime
    let runtime = tokio::runtime::Runtime::new()?;

    // Execute the command
    runtime.block_on(async { commands::execute(cli).await })?;

    Ok(())
}
