//! Repository accessor using libgit2
//!
//! A read-only view over the commit DAG, the local branches and the working
//! tree of one repository. Nothing here writes to the repository.

use super::name_rev::RevisionNames;
use super::{RepoError, RepoResult};
use git2::{BranchType, ErrorCode, Oid, Repository, Sort};
use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A commit as seen by the predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub id: Oid,
    /// Full commit message, as stored
    pub message: String,
    /// Parent ids in order (first parent first)
    pub parents: Vec<Oid>,
}

impl CommitInfo {
    fn from_commit(commit: &git2::Commit) -> Self {
        Self {
            id: commit.id(),
            message: commit.message().unwrap_or("").to_string(),
            parents: commit.parent_ids().collect(),
        }
    }

    /// Short hash (7 characters)
    pub fn short_id(&self) -> String {
        self.id.to_string()[..7].to_string()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() >= 2
    }
}

/// Read-only handle to the repository being graded.
pub struct GitRepository {
    repo: Repository,
    path: PathBuf,
    revision_names: OnceCell<RevisionNames>,
}

impl GitRepository {
    /// Open the repository rooted at `path`.
    ///
    /// Parent directories are not searched: the path must be the repository
    /// itself (its working tree or, for bare repositories, its git dir).
    pub fn open(path: &Path) -> RepoResult<Self> {
        if !path.exists() {
            return Err(RepoError::NotFound(path.to_path_buf()));
        }
        let repo = Repository::open(path).map_err(|source| RepoError::NotARepository {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Opened git repository at {:?}", repo.path());
        Ok(Self {
            repo,
            path: path.to_path_buf(),
            revision_names: OnceCell::new(),
        })
    }

    /// Path the repository was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Working tree root, `None` for bare repositories.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Names of all local branches. Unreadable refs are skipped.
    pub fn list_branches(&self) -> BTreeSet<String> {
        let branches = match self.repo.branches(Some(BranchType::Local)) {
            Ok(branches) => branches,
            Err(e) => {
                warn!("Failed to list branches: {}", e);
                return BTreeSet::new();
            }
        };

        branches
            .filter_map(|entry| match entry {
                Ok((branch, _)) => branch.name().ok().flatten().map(str::to_string),
                Err(e) => {
                    debug!("Skipping unreadable branch: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Commits reachable from `reference` (a branch name, or HEAD when
    /// `None`), newest first, at most `limit` of them.
    ///
    /// An unborn HEAD yields an empty history.
    pub fn commit_history(
        &self,
        reference: Option<&str>,
        limit: Option<usize>,
    ) -> RepoResult<Vec<CommitInfo>> {
        let start = match reference {
            Some(name) => match self.branch_head_id(name)? {
                Some(oid) => oid,
                None => return Ok(Vec::new()),
            },
            None => match self.head_id()? {
                Some(oid) => oid,
                None => return Ok(Vec::new()),
            },
        };

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TIME)?;
        revwalk.push(start)?;

        let limit = limit.unwrap_or(usize::MAX);
        let mut commits = Vec::new();
        for oid_result in revwalk {
            if commits.len() >= limit {
                break;
            }
            let commit = self.repo.find_commit(oid_result?)?;
            commits.push(CommitInfo::from_commit(&commit));
        }

        Ok(commits)
    }

    /// First commit in HEAD's history (newest first) whose message, with
    /// surrounding whitespace trimmed, equals `message`.
    pub fn find_first_commit_matching_exact(&self, message: &str) -> RepoResult<Option<CommitInfo>> {
        Ok(self
            .commit_history(None, None)?
            .into_iter()
            .find(|commit| commit.message.trim() == message))
    }

    /// Head commit of a local branch.
    pub fn resolve_branch_head(&self, name: &str) -> RepoResult<Option<CommitInfo>> {
        let Some(oid) = self.branch_head_id(name)? else {
            return Ok(None);
        };
        let commit = self.repo.find_commit(oid)?;
        Ok(Some(CommitInfo::from_commit(&commit)))
    }

    /// Contents of a working-tree file, `None` when it does not exist or
    /// the repository has no working tree.
    pub fn read_working_file(&self, relative_path: &str) -> Option<String> {
        let full_path = self.workdir()?.join(relative_path);
        match std::fs::read(&full_path) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                debug!("Working file {} not readable: {}", full_path.display(), e);
                None
            }
        }
    }

    /// `user.name` from the repository's merged configuration.
    pub fn display_name(&self) -> RepoResult<String> {
        let config = self.repo.config()?;
        match config.get_string("user.name") {
            Ok(name) if !name.trim().is_empty() => Ok(name),
            Ok(_) => Err(RepoError::MissingDisplayName),
            Err(e) if e.code() == ErrorCode::NotFound => Err(RepoError::MissingDisplayName),
            Err(e) => Err(e.into()),
        }
    }

    /// `name-rev` style description of a commit, `None` when no ref reaches it.
    pub fn revision_name(&self, oid: Oid) -> RepoResult<Option<String>> {
        if let Some(names) = self.revision_names.get() {
            return Ok(names.name_of(oid));
        }
        let names = RevisionNames::compute(&self.repo)?;
        Ok(self.revision_names.get_or_init(|| names).name_of(oid))
    }

    /// Whether `ancestor` is reachable from `descendant` (a commit is not its own ancestor).
    pub fn is_ancestor(&self, ancestor: Oid, descendant: Oid) -> RepoResult<bool> {
        Ok(self.repo.graph_descendant_of(descendant, ancestor)?)
    }

    fn head_id(&self) -> RepoResult<Option<Oid>> {
        match self.repo.head() {
            Ok(head) => Ok(Some(head.peel_to_commit()?.id())),
            Err(e) if matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound) => {
                debug!("HEAD is unborn: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn branch_head_id(&self, name: &str) -> RepoResult<Option<Oid>> {
        match self.repo.find_branch(name, BranchType::Local) {
            Ok(branch) => Ok(Some(branch.get().peel_to_commit()?.id())),
            Err(e) if matches!(e.code(), ErrorCode::NotFound | ErrorCode::InvalidSpec) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
