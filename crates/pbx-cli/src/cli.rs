//! CLI argument parsing using clap derive

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pbxbump - Bump build numbers and marketing versions in project files
#[derive(Parser, Debug)]
#[command(name = "pbxbump")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to ./pbxbump.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Which block of which project file to edit.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetArgs {
    /// Project file to edit (found under ./*.xcodeproj when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub project: Option<PathBuf>,

    /// Configuration block name, e.g. Release
    #[arg(short = 'c', long, value_name = "NAME")]
    pub configuration: Option<String>,

    /// Use the first block when several share the configuration name
    #[arg(long)]
    pub first_match: bool,

    /// Show the change without writing it
    #[arg(long)]
    pub dry_run: bool,

    /// Output as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Where to record results for later CI steps.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportArgs {
    /// Append the result to the CI environment file
    #[arg(long)]
    pub export: bool,

    /// Environment file to append to
    #[arg(long, value_name = "FILE", env = "GITHUB_ENV")]
    pub env_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Increment the build number, or set it explicitly
    ///
    /// Examples:
    ///   pbxbump build-number -c Release              # 41 -> 42
    ///   pbxbump build-number -c Release --set 100    # 41 -> 100
    ///   pbxbump build-number -c Release --export     # also write CURRENT_BUILD_NUMBER to $GITHUB_ENV
    BuildNumber {
        /// Explicit build number instead of incrementing
        #[arg(long, value_name = "N", allow_hyphen_values = true)]
        set: Option<String>,

        /// Reject explicit build numbers that do not increase the current one
        #[arg(long)]
        require_increase: bool,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Set the marketing version
    ///
    /// Examples:
    ///   pbxbump marketing-version 2.4 -c Release
    ///   pbxbump marketing-version 2.4.1 -c Release --dry-run
    MarketingVersion {
        /// New version: MAJOR.MINOR or MAJOR.MINOR.PATCH
        #[arg(allow_hyphen_values = true)]
        version: String,

        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        export: ExportArgs,
    },

    /// Extract release severity and version from a review comment
    ReleaseIntent {
        /// File holding the comment body, or - for stdin
        #[arg(short, long, default_value = "-", value_name = "FILE")]
        input: String,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        export: ExportArgs,
    },
}
