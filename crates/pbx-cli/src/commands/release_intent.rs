//! Release intent command implementation
//!
//! Reads a review comment and reports the requested release severity and
//! version, for CI steps that gate a release on an approval comment.

use colored::Colorize;
use std::io::Read;
use std::path::Path;

use pbx_core::release::{SEVERITY_ENV_VAR, VERSION_ENV_VAR};
use pbx_core::ReleaseIntent;

use crate::cli::ExportArgs;
use crate::context::Context;
use crate::error::{CliError, Result};

/// Parse the comment in `input` (`-` for stdin).
pub fn run_release_intent(
    ctx: &Context,
    input: &str,
    json: bool,
    export: &ExportArgs,
) -> Result<()> {
    let env_file = ctx.env_file(export)?;
    let body = read_body(ctx, input)?;

    let intent = ReleaseIntent::parse(&body)?;
    tracing::debug!(severity = %intent.severity, version = %intent.version, "Parsed release intent");

    if json {
        println!("{}", serde_json::to_string_pretty(&intent)?);
    } else {
        println!(
            "{} release {} ({})",
            "OK".green().bold(),
            intent.version.to_string().green(),
            intent.severity.to_string().cyan()
        );
    }

    if let Some(env_file) = env_file {
        env_file.export(SEVERITY_ENV_VAR, intent.severity.as_str())?;
        env_file.export(VERSION_ENV_VAR, &intent.version.to_string())?;
    }
    Ok(())
}

fn read_body(ctx: &Context, input: &str) -> Result<String> {
    if input == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        return Ok(body);
    }

    let path = ctx.cwd.join(Path::new(input));
    std::fs::read_to_string(&path)
        .map_err(|e| CliError::user(format!("cannot read {}: {e}", path.display())))
}
