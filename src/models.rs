//! Report model handed from the rubric engine to the reporters

use crate::rubric::RubricResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything a reporter needs to render one grading run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeReport {
    /// Student name, from `user.name` or the configured fallback
    pub display_name: String,
    pub repository: PathBuf,
    pub graded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: RubricResult,
}

impl GradeReport {
    pub fn new(display_name: String, repository: PathBuf, result: RubricResult) -> Self {
        Self {
            display_name,
            repository,
            graded_at: Utc::now(),
            result,
        }
    }

    pub fn score(&self) -> u32 {
        self.result.score
    }

    pub fn max_score(&self) -> u32 {
        self.result.max_score
    }

    /// `score/max_score`, e.g. `85/100`
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.score(), self.max_score())
    }
}
