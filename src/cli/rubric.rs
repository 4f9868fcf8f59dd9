//! Rubric command - show the rules that would be applied

use crate::config::load_config;
use crate::rubric::Rubric;
use anyhow::{Context, Result};
use console::style;

pub fn run(config_path: Option<&std::path::Path>, format: &str) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let rubric = config.rubric()?;

    let output = match format {
        "json" => serde_json::to_string_pretty(&rubric)?,
        "toml" => toml::to_string_pretty(&rubric).context("Failed to serialize rubric")?,
        _ => render_table(&rubric),
    };
    println!("{}", output);
    Ok(())
}

fn render_table(rubric: &Rubric) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        style(format!("  {:>2}  {:<18} {:>6}  CHECK", "#", "ID", "POINTS")).dim()
    ));
    for (i, rule) in rubric.rules.iter().enumerate() {
        out.push_str(&format!(
            "  {:>2}  {:<18} {:>6}  {}\n",
            i + 1,
            rule.id,
            rule.points,
            rule.check
        ));
    }
    out.push_str(&format!(
        "\nTotal: {}/{}",
        style(rubric.total_points()).bold(),
        rubric.max_score
    ));
    out
}
