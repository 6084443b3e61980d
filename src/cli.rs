//! CLI argument parsing module for dockbump

use crate::config::{parse_duration, MissingFlavorPolicy};
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

fn parse_age(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

/// Runtime Docker build definition updater
#[derive(Parser, Debug, Clone)]
#[command(
    name = "dockbump",
    about = "Keeps runtime Docker build definitions current with upstream releases"
)]
pub struct CliArgs {
    /// Definition root containing one directory per tracked major version
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // General options
    /// Dry run mode - resolve and render without writing any file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print version information
    #[arg(short = 'V', long = "version")]
    pub print_version: bool,

    // Major version filters
    /// Process only these major versions (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub only: Vec<u64>,

    /// Skip these major versions (can be specified multiple times)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<u64>,

    /// Also re-render majors that are already current, at their pinned versions
    #[arg(long)]
    pub all: bool,

    // Resolution policy
    /// Ignore releases published less than this long ago (e.g., 2w, 10d, 1m)
    #[arg(long, value_parser = parse_age)]
    pub age: Option<Duration>,

    /// What to do when the alternate build flavor is not published yet
    #[arg(long, value_enum)]
    pub missing_flavor: Option<MissingFlavorPolicy>,

    /// Secondary-tool version to render instead of fetching the latest one
    #[arg(long)]
    pub tool_version: Option<String>,

    // Sources
    /// Configuration file (default: <PATH>/dockbump.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Release index URL
    #[arg(long)]
    pub releases_url: Option<String>,

    /// Alternate build index base URL
    #[arg(long)]
    pub builds_url: Option<String>,

    /// Secondary-tool latest-version URL
    #[arg(long)]
    pub tool_version_url: Option<String>,

    /// Release schedule URL; majors past their end of life are skipped
    #[arg(long)]
    pub schedule_url: Option<String>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Print only the comma-separated list of updated versions
    #[arg(long)]
    pub summary: bool,
}

impl CliArgs {
    /// Check if any major filter is specified
    pub fn has_major_filter(&self) -> bool {
        !self.only.is_empty() || !self.exclude.is_empty()
    }

    /// Whether interactive progress should be drawn
    pub fn show_progress(&self) -> bool {
        !(self.quiet || self.json || self.summary)
    }
}
