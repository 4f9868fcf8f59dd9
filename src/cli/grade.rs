//! Grade command - evaluate the rubric and print the report

use crate::config::load_config;
use crate::models::GradeReport;
use crate::reporters;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

/// Run the grade command
pub fn run(
    path: &Path,
    config_path: Option<&Path>,
    format: &str,
    output_path: Option<&Path>,
    no_emoji: bool,
    fail_under: Option<u32>,
    display_name: Option<String>,
) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let report = crate::grade(path, &config, display_name)
        .with_context(|| format!("Cannot grade {}", path.display()))?;

    let output = reporters::report(&report, format, !no_emoji)?;

    if let Some(out_path) = output_path {
        std::fs::write(out_path, &output)
            .with_context(|| format!("Failed to write {}", out_path.display()))?;
        let file_icon = if no_emoji { "" } else { "📄 " };
        eprintln!(
            "{}Report written to: {}",
            style(file_icon).bold(),
            style(out_path.display()).cyan()
        );
    } else {
        print!("{}", output);
        if !output.ends_with('\n') {
            println!();
        }
    }

    check_fail_threshold(fail_under, &report);
    Ok(())
}

/// Exit with status 1 when the score is below `--fail-under`
fn check_fail_threshold(fail_under: Option<u32>, report: &GradeReport) {
    if let Some(threshold) = fail_under {
        if report.score() < threshold {
            eprintln!(
                "Failing due to --fail-under={} (score {})",
                threshold,
                report.score_line()
            );
            std::process::exit(1);
        }
    }
}
