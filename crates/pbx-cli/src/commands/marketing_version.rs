//! Marketing version command implementation

use pbx_core::set_marketing_version;

use super::output::print_report;
use crate::cli::{ExportArgs, TargetArgs};
use crate::context::Context;
use crate::error::Result;

/// Set the marketing version to `version`.
pub fn run_marketing_version(
    ctx: &Context,
    version: &str,
    target: &TargetArgs,
    export: &ExportArgs,
) -> Result<()> {
    let project = ctx.project(target)?;
    let configuration = ctx.configuration(target)?;
    let env_file = ctx.env_file(export)?;
    let options = ctx.edit_options(target, &ctx.config.marketing_version.key);

    let report = set_marketing_version(&project, &configuration, version, &options)?;
    print_report(&report, target.json)?;

    if let Some(env_file) = env_file.filter(|_| !target.dry_run) {
        env_file.export(&ctx.config.marketing_version.env_var, &report.new_value)?;
    }
    Ok(())
}
