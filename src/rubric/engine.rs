//! Rubric evaluation
//!
//! The result is threaded through a fold over the rules: each rule adds one
//! outcome, in rule order, and its points when the check holds.

use super::{Check, Rule};
use crate::predicates::Predicates;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What one rule contributed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub id: String,
    pub passed: bool,
    /// Points awarded (0 on failure)
    pub awarded: u32,
    /// Points the rule is worth
    pub points: u32,
    pub comment: String,
}

/// Score and per-rule comments for one grading run.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RubricResult {
    pub score: u32,
    pub max_score: u32,
    pub outcomes: Vec<RuleOutcome>,
}

impl RubricResult {
    pub fn new(max_score: u32) -> Self {
        Self {
            score: 0,
            max_score,
            outcomes: Vec::new(),
        }
    }

    /// Append the outcome of `rule`.
    pub fn record(mut self, rule: &Rule, passed: bool) -> Self {
        let awarded = if passed { rule.points } else { 0 };
        let comment = if passed { &rule.success } else { &rule.failure };
        // Unvalidated rule lists may exceed u32.
        self.score = self.score.saturating_add(awarded);
        self.outcomes.push(RuleOutcome {
            id: rule.id.clone(),
            passed,
            awarded,
            points: rule.points,
            comment: comment.clone(),
        });
        self
    }

    pub fn comments(&self) -> impl Iterator<Item = &str> {
        self.outcomes.iter().map(|o| o.comment.as_str())
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn outcome(&self, id: &str) -> Option<&RuleOutcome> {
        self.outcomes.iter().find(|o| o.id == id)
    }
}

/// Evaluate `rules` against the repository behind `predicates`.
pub fn evaluate(rules: &[Rule], max_score: u32, predicates: &Predicates) -> RubricResult {
    evaluate_with(rules, max_score, |check| check.holds(predicates))
}

/// Fold `rules` into a result, deciding each check with `judge`.
pub fn evaluate_with<F>(rules: &[Rule], max_score: u32, mut judge: F) -> RubricResult
where
    F: FnMut(&Check) -> bool,
{
    rules
        .iter()
        .fold(RubricResult::new(max_score), |result, rule| {
            let passed = judge(&rule.check);
            debug!("Rule {} ({} pts): {}", rule.id, rule.points, if passed { "pass" } else { "fail" });
            result.record(rule, passed)
        })
}
