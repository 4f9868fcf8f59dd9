//! Rubric definition and evaluation
//!
//! A rubric is an ordered list of rules. Each rule pairs a [`Check`] (a small
//! boolean expression over the predicate library) with a point value and the
//! comments shown when it passes or fails. Rules are data: the standard
//! course rubric lives in [`standard`] and any other rubric can be loaded
//! from configuration without touching the evaluation code in [`engine`].
//!
//! # Example
//!
//! ```toml
//! max_score = 10
//!
//! [[rules]]
//! id = "initial-commit"
//! points = 10
//! success = "Commit inicial encontrado."
//! failure = "Commit inicial no encontrado."
//! check = { all = [
//!     { commit_message = "Commit inicial" },
//!     { file_contains = { path = "Calc.kt", text = "fun multiplica" } },
//! ] }
//! ```

mod engine;
pub mod standard;

pub use engine::{evaluate, evaluate_with, RubricResult, RuleOutcome};
pub use standard::Expectations;

use crate::predicates::Predicates;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Points available across the standard rubric.
pub const DEFAULT_MAX_SCORE: u32 = 100;

fn default_max_score() -> u32 {
    DEFAULT_MAX_SCORE
}

/// Why a rubric definition was rejected.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RubricError {
    #[error("Rubric has no rules")]
    Empty,

    #[error("Duplicate rule id '{0}'")]
    DuplicateId(String),

    #[error("Rule points add up to {total}, but max_score is {max_score}")]
    PointsMismatch { total: u64, max_score: u32 },
}

/// Boolean expression evaluated against the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// The repository directory exists
    RepositoryExists,
    /// A local branch with this exact name exists
    BranchExists(String),
    /// Some commit reachable from HEAD has this text in its message
    CommitMessage(String),
    /// The working-tree file contains the text
    FileContains { path: String, text: String },
    /// Some merge in HEAD's history involves this branch
    Merged(String),
    /// `branch`'s head is exactly one commit on top of the `anchor` commit,
    /// which must be in `parent`'s recent history
    DerivesFrom {
        branch: String,
        parent: String,
        anchor: String,
    },
    All(Vec<Check>),
    Any(Vec<Check>),
    /// Negation. A predicate that failed on a git error answered `false`,
    /// so its negation passes.
    Not(Box<Check>),
}

impl Check {
    pub fn holds(&self, p: &Predicates) -> bool {
        match self {
            Check::RepositoryExists => p.repository_exists(),
            Check::BranchExists(name) => p.branch_exists(name),
            Check::CommitMessage(text) => p.commit_message_contains(text),
            Check::FileContains { path, text } => p.file_contains(path, text),
            Check::Merged(branch) => p.merge_involves_branch(branch),
            Check::DerivesFrom {
                branch,
                parent,
                anchor,
            } => p.branch_derives_from_commit(branch, parent, anchor),
            Check::All(checks) => checks.iter().all(|c| c.holds(p)),
            Check::Any(checks) => checks.iter().any(|c| c.holds(p)),
            Check::Not(check) => !check.holds(p),
        }
    }

    pub fn not(check: Check) -> Check {
        Check::Not(Box::new(check))
    }

    pub fn file_contains(path: impl Into<String>, text: impl Into<String>) -> Check {
        Check::FileContains {
            path: path.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list(f: &mut fmt::Formatter<'_>, name: &str, checks: &[Check]) -> fmt::Result {
            write!(f, "{name}(")?;
            for (i, check) in checks.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{check}")?;
            }
            write!(f, ")")
        }

        match self {
            Check::RepositoryExists => write!(f, "repository_exists"),
            Check::BranchExists(name) => write!(f, "branch_exists({name:?})"),
            Check::CommitMessage(text) => write!(f, "commit_message({text:?})"),
            Check::FileContains { path, text } => write!(f, "file_contains({path:?}, {text:?})"),
            Check::Merged(branch) => write!(f, "merged({branch:?})"),
            Check::DerivesFrom {
                branch,
                parent,
                anchor,
            } => write!(f, "derives_from({branch:?}, {parent:?}, {anchor:?})"),
            Check::All(checks) => list(f, "all", checks),
            Check::Any(checks) => list(f, "any", checks),
            Check::Not(check) => write!(f, "not({check})"),
        }
    }
}

/// One scored item of the rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub points: u32,
    /// Comment recorded when the check holds
    pub success: String,
    /// Comment recorded when it does not
    pub failure: String,
    pub check: Check,
}

/// An ordered, validated list of rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    #[serde(default = "default_max_score")]
    pub max_score: u32,
    pub rules: Vec<Rule>,
}

impl Rubric {
    /// The 12-rule course rubric built from the given expectations.
    pub fn standard(expectations: &Expectations) -> Self {
        Self {
            max_score: DEFAULT_MAX_SCORE,
            rules: standard::rules(expectations),
        }
    }

    /// Sum of every rule's points, widened so custom rubrics cannot overflow it.
    pub fn total_points(&self) -> u64 {
        self.rules.iter().map(|rule| u64::from(rule.points)).sum()
    }

    /// Reject rubrics that cannot produce a meaningful `score/max_score`.
    pub fn validate(&self) -> Result<(), RubricError> {
        if self.rules.is_empty() {
            return Err(RubricError::Empty);
        }

        let mut seen = HashSet::new();
        for rule in &self.rules {
            if !seen.insert(rule.id.as_str()) {
                return Err(RubricError::DuplicateId(rule.id.clone()));
            }
        }

        let total = self.total_points();
        if total != u64::from(self.max_score) {
            return Err(RubricError::PointsMismatch {
                total,
                max_score: self.max_score,
            });
        }
        Ok(())
    }

    pub fn evaluate(&self, predicates: &Predicates) -> RubricResult {
        evaluate(&self.rules, self.max_score, predicates)
    }
}
