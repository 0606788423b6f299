use clap::{Parser, Subcommand};
use reviewer_core::config::{parse_timeout_secs, CliConfigOverrides};
use std::path::PathBuf;

/// Reviewer - AI code review from the terminal
#[derive(Parser, Debug)]
#[command(name = "reviewer")]
#[command(about = "AI code review backed by Gemini", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML config file with model, base_url, timeout_secs, system_instruction_file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Gemini model to use (e.g., gemini-2.5-flash)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Base URL of the generative API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, value_parser = parse_timeout)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Review a source file (or stdin)
    Review(ReviewArgs),

    /// Show effective configuration and where each value comes from
    Config,
}

#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// File to review; reads stdin when omitted or "-"
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Settings given on the command line
    pub fn overrides(&self) -> CliConfigOverrides {
        CliConfigOverrides {
            model: self.model.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

fn parse_timeout(s: &str) -> Result<u64, String> {
    parse_timeout_secs(s).map_err(|e| e.to_string())
}
