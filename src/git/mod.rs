//! Read-only access to the repository being graded
//!
//! Wraps libgit2 (through the git2 crate) behind a small accessor that only
//! answers the questions the predicates need: which branches exist, what a
//! branch's history looks like, which commit carries a given message, and
//! what a file in the working tree contains.
//!
//! # Example
//!
//! ```no_run
//! use checkdam::git::GitRepository;
//! use std::path::Path;
//!
//! let repo = GitRepository::open(Path::new("../calc-kotlin-dam")).unwrap();
//! let branches = repo.list_branches();
//! let recent = repo.commit_history(Some("main"), Some(10)).unwrap();
//! ```

pub mod name_rev;
pub mod repository;

pub use name_rev::{RevisionName, RevisionNames};
pub use repository::{CommitInfo, GitRepository};

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while opening or querying a repository.
///
/// Only `open` and `display_name` surface these to callers; predicates
/// swallow them and answer `false`.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Repository path does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Not a git repository: {path}")]
    NotARepository {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("No display name configured (set `git config user.name` or report.fallback_display_name)")]
    MissingDisplayName,

    #[error("Git error: {0}")]
    Git(#[from] git2::Error),
}

pub type RepoResult<T> = Result<T, RepoError>;
