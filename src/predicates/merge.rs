//! Merge detection strategies
//!
//! "Was branch X merged?" has no exact answer in git once the branch moves
//! or is deleted, so the question is answered by a named strategy:
//!
//! - `revision-name` (default): some merge commit in HEAD's history has a
//!   parent whose `name-rev` description contains the branch name. Matching
//!   is by substring, so `suma` also matches `feature/suma-v2`.
//! - `ancestry`: the branch head is, or is an ancestor of, a non-first parent
//!   of some merge commit in HEAD's history.

use crate::git::{GitRepository, RepoResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergeStrategy {
    #[default]
    RevisionName,
    Ancestry,
}

impl MergeStrategy {
    pub fn branch_was_merged(&self, repo: &GitRepository, branch: &str) -> RepoResult<bool> {
        match self {
            MergeStrategy::RevisionName => merged_by_revision_name(repo, branch),
            MergeStrategy::Ancestry => merged_by_ancestry(repo, branch),
        }
    }
}

impl FromStr for MergeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revision-name" | "name-rev" => Ok(MergeStrategy::RevisionName),
            "ancestry" => Ok(MergeStrategy::Ancestry),
            _ => Err(format!(
                "Unknown merge strategy '{}'. Valid strategies: revision-name, ancestry",
                s
            )),
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeStrategy::RevisionName => write!(f, "revision-name"),
            MergeStrategy::Ancestry => write!(f, "ancestry"),
        }
    }
}

fn merged_by_revision_name(repo: &GitRepository, branch: &str) -> RepoResult<bool> {
    for commit in repo.commit_history(None, None)? {
        if !commit.is_merge() {
            continue;
        }
        for parent in &commit.parents {
            if let Some(name) = repo.revision_name(*parent)? {
                if name.contains(branch) {
                    return Ok(true);
                }
            }
        }
    }
    Ok(false)
}

fn merged_by_ancestry(repo: &GitRepository, branch: &str) -> RepoResult<bool> {
    let Some(head) = repo.resolve_branch_head(branch)? else {
        return Ok(false);
    };

    for commit in repo.commit_history(None, None)? {
        // The first parent is the branch merged into, not the one merged.
        for parent in commit.parents.iter().skip(1) {
            if *parent == head.id || repo.is_ancestor(head.id, *parent)? {
                return Ok(true);
            }
        }
    }
    Ok(false)
}
