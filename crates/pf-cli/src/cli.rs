//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// pf - profile tables and validate data-quality test cases against them
#[derive(Parser, Debug)]
#[command(name = "pf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: String,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the database path
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute table profiles and write them to the profile output
    Profile(ProfileArgs),

    /// Run the test suite against computed profiles
    Validate(ValidateArgs),

    /// List the metrics the profiler knows
    Metrics,
}

/// Arguments for the profile command
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Tables to profile (comma-separated, default: config tables or whole schema)
    #[arg(long)]
    pub tables: Option<String>,

    /// Compute metrics on the configured sample instead of the full table
    #[arg(long)]
    pub sample: bool,
}

/// Arguments for the validate command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Profiles file (default: the configured profile output)
    #[arg(long)]
    pub profiles: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub output: ValidateOutput,
}

/// Validate output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidateOutput {
    /// One line per verdict plus a summary
    Text,
    /// JSON array of verdicts
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
