//! Command implementations

mod config;
mod review;

use crate::cli::{Cli, Commands};
use crate::errors;
use crate::output::OutputWriter;
use anyhow::Result;
use reviewer_core::config::LayeredConfig;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let settings = load_settings(&cli)?;

    match cli.command {
        Commands::Review(args) => review::execute(args, &settings, &output).await,
        Commands::Config => config::execute(&settings, &output),
    }
}

/// Defaults, then the --config file, then environment, then flags
fn load_settings(cli: &Cli) -> Result<LayeredConfig> {
    let mut settings = LayeredConfig::with_defaults();
    if let Some(path) = &cli.config {
        settings = settings.load_from_file(path).map_err(|e| errors::from_reviewer(&e))?;
    }
    let mut settings = settings.load_from_env();
    settings.update_from_cli(cli.overrides());
    Ok(settings)
}
