//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates a per-rule table suitable for:
//! - Feedback comments on a course platform
//! - Pull request comments on the student's repository

use crate::models::GradeReport;
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &GradeReport, emoji: bool) -> Result<String> {
    let mut md = String::new();

    md.push_str(&format!("# Informe de Evaluación: {}\n\n", escape(&report.display_name)));
    md.push_str(&format!(
        "**Puntuación final:** {}\n\n",
        report.score_line()
    ));

    md.push_str("| # | Regla | Puntos | Resultado |\n");
    md.push_str("|---|-------|--------|-----------|\n");
    for (i, outcome) in report.result.outcomes.iter().enumerate() {
        let mark = match (outcome.passed, emoji) {
            (true, true) => "✅",
            (false, true) => "❌",
            (true, false) => "PASS",
            (false, false) => "FAIL",
        };
        md.push_str(&format!(
            "| {} | `{}` | {}/{} | {} {} |\n",
            i + 1,
            outcome.id,
            outcome.awarded,
            outcome.points,
            mark,
            escape(&outcome.comment)
        ));
    }

    md.push_str(&format!(
        "\n---\n\n_Generado por checkdam el {}_\n",
        Local::now().format("%Y-%m-%d %H:%M")
    ));

    Ok(md)
}

/// Keep table cells intact.
fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}
