//! Output reporters for grading results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with emoji pass/fail markers
//! - `json` - Machine-readable JSON
//! - `markdown` - A table for pasting into a course platform

mod json;
mod markdown;
mod text;

use crate::models::GradeReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Render a grade report in the specified format
pub fn report(report: &GradeReport, format: &str, emoji: bool) -> Result<String> {
    let fmt = OutputFormat::from_str(format)?;
    report_with_format(report, fmt, emoji)
}

/// Render a grade report using an OutputFormat enum
pub fn report_with_format(report: &GradeReport, format: OutputFormat, emoji: bool) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, emoji),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report, emoji),
    }
}
