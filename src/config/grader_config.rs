//! Grader configuration support
//!
//! Loads configuration from an explicit file, from `checkdam.toml` in the
//! current directory, or from the user config directory, in that order.
//!
//! # Configuration Format
//!
//! ```toml
//! # checkdam.toml
//!
//! [expectations]
//! principal_branch = "main"
//! source_file = "Calc.kt"
//! initial_commit = "Commit inicial"
//!
//! [history]
//! limit = 1000          # commits of the parent branch searched for the anchor
//!
//! [merge]
//! strategy = "revision-name"   # or "ancestry"
//!
//! [report]
//! fallback_display_name = "Sin nombre"
//!
//! # Optional: replaces the standard rubric entirely
//! [rubric]
//! max_score = 100
//!
//! [[rubric.rules]]
//! id = "division-branch"
//! points = 100
//! success = "Rama encontrada."
//! failure = "Rama no encontrada."
//! check = { branch_exists = "feature/division" }
//! ```

use super::ConfigError;
use crate::predicates::{MergeStrategy, PredicateOptions, DEFAULT_HISTORY_LIMIT};
use crate::rubric::{Expectations, Rubric};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File looked up in the current directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "checkdam.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraderConfig {
    /// Literals used by the standard rubric
    pub expectations: Expectations,
    /// Custom rubric; when absent the standard rubric is built from `expectations`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rubric: Option<Rubric>,
    pub history: HistoryConfig,
    pub merge: MergeConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// How many commits of the parent branch are searched for an anchor commit
    pub limit: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    pub strategy: MergeStrategy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Name shown when the repository has no `user.name`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_display_name: Option<String>,
}

impl GraderConfig {
    /// Load a config file; the format follows the extension (`.toml` or `.json`).
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            }),
            Some("json") => serde_json::from_str(&content).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            }),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    /// The rubric to grade with, validated.
    pub fn rubric(&self) -> Result<Rubric, ConfigError> {
        let rubric = match &self.rubric {
            Some(custom) => custom.clone(),
            None => Rubric::standard(&self.expectations),
        };
        rubric.validate()?;
        Ok(rubric)
    }

    pub fn predicate_options(&self) -> PredicateOptions {
        PredicateOptions {
            history_limit: self.history.limit,
            merge_strategy: self.merge.strategy,
        }
    }
}

/// User-level config file (`~/.config/checkdam/config.toml` on Linux).
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("checkdam").join("config.toml"))
}

/// Resolve the configuration for a run.
///
/// An explicit path must load. The implicit locations are best effort: a
/// file that fails to parse is reported and skipped.
pub fn load_config(explicit: Option<&Path>) -> Result<GraderConfig, ConfigError> {
    if let Some(path) = explicit {
        let config = GraderConfig::from_file(path)?;
        debug!("Loaded config from {}", path.display());
        return Ok(config);
    }

    let candidates = std::iter::once(PathBuf::from(CONFIG_FILE_NAME)).chain(user_config_path());
    for path in candidates.filter(|p| p.exists()) {
        match GraderConfig::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No config found, using defaults");
    Ok(GraderConfig::default())
}
