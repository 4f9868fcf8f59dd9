//! Text (terminal) reporter

use crate::models::GradeReport;
use anyhow::Result;
use console::style;

fn marker(passed: bool, emoji: bool) -> String {
    match (passed, emoji) {
        (true, true) => "✅".to_string(),
        (false, true) => "❌".to_string(),
        (true, false) => style("[PASS]").green().to_string(),
        (false, false) => style("[FAIL]").red().to_string(),
    }
}

/// Render report as terminal output: one line per rule, then the score.
pub fn render(report: &GradeReport, emoji: bool) -> Result<String> {
    let mut out = String::new();

    let header_icon = if emoji { "📝 " } else { "" };
    out.push_str(&format!(
        "{}{}\n",
        header_icon,
        style("Informe de Evaluación:").bold()
    ));

    for outcome in &report.result.outcomes {
        out.push_str(&format!(
            "{} {}\n",
            marker(outcome.passed, emoji),
            outcome.comment
        ));
    }

    let score_icon = if emoji { "📊 " } else { "" };
    out.push_str(&format!(
        "{}Puntuación final {}: {}\n",
        score_icon,
        report.display_name,
        style(report.score_line()).bold()
    ));

    Ok(out)
}
