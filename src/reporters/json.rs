//! JSON reporter
//!
//! Outputs the full GradeReport as pretty-printed JSON.
//! Useful for collecting grades across a class with jq.

use crate::models::GradeReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &GradeReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
