//! pbxbump CLI
//!
//! Bumps the build number and sets the marketing version in a project
//! descriptor, for use from release pipelines.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use context::Context;
use error::Result;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = Context::load(&cwd, cli.config.as_deref())?;
    execute_command(&ctx, cli.command)
}

fn execute_command(ctx: &Context, cmd: Commands) -> Result<()> {
    match cmd {
        Commands::BuildNumber {
            set,
            require_increase,
            target,
            export,
        } => commands::run_build_number(ctx, set.as_deref(), require_increase, &target, &export),
        Commands::MarketingVersion {
            version,
            target,
            export,
        } => commands::run_marketing_version(ctx, &version, &target, &export),
        Commands::ReleaseIntent {
            input,
            json,
            export,
        } => commands::run_release_intent(ctx, &input, json, &export),
    }
}
