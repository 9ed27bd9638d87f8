//! CLI argument parsing module for pubwatch

use clap::Parser;
use std::path::PathBuf;

/// Flutter SDK and pub.dev dependency update checker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pubwatch",
    version,
    about = "Check Flutter repositories for outdated SDK pins and pub.dev dependencies"
)]
pub struct CliArgs {
    /// Path to the repositories configuration file
    /// (default: $REPOSITORIES_CONFIG, then ./repositories.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Check repositories but do not publish to Slack
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Include dev_dependencies even when the configuration disables them
    #[arg(long)]
    pub include_dev_deps: bool,

    /// Output collected reports as JSON to stdout
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}
