//! Init command - write an example checkdam.toml

use crate::config::CONFIG_FILE_NAME;
use crate::rubric::Expectations;
use anyhow::{Context, Result};
use console::style;
use std::path::Path;

const HEADER: &str = r#"# checkdam configuration
#
# Every literal below is what the standard rubric looks for. Change them to
# adapt the exercise without rewriting the rules.

[history]
# Commits of the principal branch searched for the initial commit
limit = 1000

[merge]
# "revision-name" (git name-rev substring match) or "ancestry"
strategy = "revision-name"

[report]
# Used only when the repository has no user.name
# fallback_display_name = "Sin nombre"

# To replace the standard rubric entirely, add:
#
# [rubric]
# max_score = 100
#
# [[rubric.rules]]
# id = "division-branch"
# points = 100
# success = "Rama encontrada."
# failure = "Rama no encontrada."
# check = { branch_exists = "feature/division" }

"#;

/// Contents of the example config file.
pub(crate) fn example_config() -> Result<String> {
    let expectations = toml::to_string(&Expectations::default())
        .context("Failed to serialize default expectations")?;
    Ok(format!("{HEADER}[expectations]\n{expectations}"))
}

/// Run the init command
pub fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        println!(
            "{} Already exists: {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, example_config()?)
        .with_context(|| format!("Failed to create {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    Ok(())
}
