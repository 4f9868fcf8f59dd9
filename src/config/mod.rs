//! Configuration module for checkdam
//!
//! This module handles:
//! - Loading `checkdam.toml` / JSON configuration
//! - Rubric expectations and full rubric overrides
//! - Traversal cap and merge-detection strategy
//! - Display-name fallback for the report

mod grader_config;

pub use grader_config::{
    load_config,
    user_config_path,
    GraderConfig,
    HistoryConfig,
    MergeConfig,
    ReportConfig,
    CONFIG_FILE_NAME,
};

use crate::rubric::RubricError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unsupported config format for {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Invalid rubric: {0}")]
    InvalidRubric(#[from] RubricError),
}
