//! Predicate library
//!
//! Boolean questions about the repository under review. Every predicate is
//! total: a missing branch, commit or file is a `false` answer, and so is a
//! git error while answering (logged at warn level). Rubric evaluation
//! therefore always runs to completion once the repository is open.

mod merge;

pub use merge::MergeStrategy;

use crate::git::{GitRepository, RepoResult};
use tracing::{debug, warn};

/// Default cap on how many commits of the parent branch are searched for
/// the anchor commit in [`Predicates::branch_derives_from_commit`].
pub const DEFAULT_HISTORY_LIMIT: usize = 1000;

/// Knobs that change how predicates answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredicateOptions {
    /// Parent-branch traversal cap for provenance checks
    pub history_limit: usize,
    /// How "was this branch merged" is decided
    pub merge_strategy: MergeStrategy,
}

impl Default for PredicateOptions {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            merge_strategy: MergeStrategy::default(),
        }
    }
}

/// Predicates bound to one opened repository.
pub struct Predicates<'r> {
    repo: &'r GitRepository,
    options: PredicateOptions,
}

impl<'r> Predicates<'r> {
    pub fn new(repo: &'r GitRepository, options: PredicateOptions) -> Self {
        Self { repo, options }
    }

    /// The repository directory is present on disk.
    pub fn repository_exists(&self) -> bool {
        self.repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .exists()
    }

    pub fn branch_exists(&self, name: &str) -> bool {
        self.repo.list_branches().contains(name)
    }

    /// Some commit reachable from HEAD has `needle` in its message (case-sensitive).
    pub fn commit_message_contains(&self, needle: &str) -> bool {
        settle("commit_message_contains", || {
            Ok(self
                .repo
                .commit_history(None, None)?
                .iter()
                .any(|commit| commit.message.contains(needle)))
        })
    }

    /// The working-tree file exists and its text contains `needle`.
    pub fn file_contains(&self, path: &str, needle: &str) -> bool {
        self.repo
            .read_working_file(path)
            .is_some_and(|content| content.contains(needle))
    }

    /// Some merge in HEAD's history involves `branch`, as decided by the
    /// configured [`MergeStrategy`].
    pub fn merge_involves_branch(&self, branch: &str) -> bool {
        settle("merge_involves_branch", || {
            self.options.merge_strategy.branch_was_merged(self.repo, branch)
        })
    }

    /// `branch`'s head sits exactly one commit on top of the anchor commit.
    ///
    /// The anchor is the newest commit in HEAD's history whose message equals
    /// `anchor_message`; it must also appear within the first
    /// `history_limit` commits of `parent`. A branch that has moved further
    /// than one commit past the anchor does not qualify.
    pub fn branch_derives_from_commit(&self, branch: &str, parent: &str, anchor_message: &str) -> bool {
        settle("branch_derives_from_commit", || {
            let branches = self.repo.list_branches();
            if !branches.contains(branch) || !branches.contains(parent) {
                debug!("{} or {} does not exist", branch, parent);
                return Ok(false);
            }

            let Some(anchor) = self.repo.find_first_commit_matching_exact(anchor_message)? else {
                debug!("No commit with message {:?}", anchor_message);
                return Ok(false);
            };

            let parent_history = self
                .repo
                .commit_history(Some(parent), Some(self.options.history_limit))?;
            if !parent_history.iter().any(|commit| commit.id == anchor.id) {
                debug!(
                    "Anchor {} not within {} commits of {}",
                    anchor.short_id(),
                    self.options.history_limit,
                    parent
                );
                return Ok(false);
            }

            let Some(head) = self.repo.resolve_branch_head(branch)? else {
                return Ok(false);
            };
            Ok(head.parents.len() == 1 && head.parents[0] == anchor.id)
        })
    }
}

/// Collapse a fallible check into a boolean, logging the failure.
///
/// A failure reads as `false` everywhere, including under `Check::Not`,
/// where it turns into a pass. The warning is the only trace of it.
fn settle(predicate: &str, check: impl FnOnce() -> RepoResult<bool>) -> bool {
    match check() {
        Ok(answer) => answer,
        Err(e) => {
            warn!("{} failed, counting as false: {}", predicate, e);
            false
        }
    }
}
