//! Shared rendering of edit reports

use colored::Colorize;
use pbx_core::{EditOutcome, EditReport};

use crate::error::Result;

/// Print `report` as JSON or as a short human summary.
pub fn print_report(report: &EditReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let location = format!(
        "{} [{}]",
        report.path.display(),
        report.configuration
    );

    match report.outcome {
        EditOutcome::Written => println!(
            "{} {} {} -> {} in {}",
            "OK".green().bold(),
            report.key.cyan(),
            report.old_value.red(),
            report.new_value.green(),
            location.yellow()
        ),
        EditOutcome::Unchanged => println!(
            "{} {} is already {} in {}",
            "OK".green().bold(),
            report.key.cyan(),
            report.new_value.green(),
            location.yellow()
        ),
        EditOutcome::DryRun => {
            println!(
                "{} {} would change {} -> {} in {}",
                "Dry run".blue().bold(),
                report.key.cyan(),
                report.old_value.red(),
                report.new_value.green(),
                location.yellow()
            );
            println!();
            print_diff(&report.diff);
        }
    }
    Ok(())
}

fn print_diff(diff: &str) {
    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}
