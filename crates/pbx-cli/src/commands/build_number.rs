//! Build number command implementation

use pbx_core::{BuildNumber, BuildNumberChange, bump_build_number};

use super::output::print_report;
use crate::cli::{ExportArgs, TargetArgs};
use crate::context::Context;
use crate::error::Result;

/// Increment the build number, or set it to `set`.
///
/// The new value is exported when requested, unless this is a dry run.
pub fn run_build_number(
    ctx: &Context,
    set: Option<&str>,
    require_increase: bool,
    target: &TargetArgs,
    export: &ExportArgs,
) -> Result<()> {
    // Validate the explicit value before anything touches the file.
    let change = match set {
        Some(raw) => BuildNumberChange::Set(raw.parse::<BuildNumber>()?),
        None => BuildNumberChange::Increment,
    };

    let project = ctx.project(target)?;
    let configuration = ctx.configuration(target)?;
    let env_file = ctx.env_file(export)?;

    let mut options = ctx.edit_options(target, &ctx.config.build_number.key);
    options.require_increase = require_increase || ctx.config.build_number.require_increase;

    let report = bump_build_number(&project, &configuration, change, &options)?;
    print_report(&report, target.json)?;

    if let Some(env_file) = env_file.filter(|_| !target.dry_run) {
        env_file.export(&ctx.config.build_number.env_var, &report.new_value)?;
    }
    Ok(())
}
