//! One grading run: open the repository, resolve who is being graded,
//! evaluate the rubric.
//!
//! Everything that can abort the run happens before the first rule is
//! evaluated, so a run either produces a full report or none at all.

use crate::config::{ConfigError, GraderConfig};
use crate::git::{GitRepository, RepoError};
use crate::models::GradeReport;
use crate::predicates::Predicates;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Failures that prevent a report from being produced.
#[derive(Error, Debug)]
pub enum GradeError {
    #[error(transparent)]
    Repository(#[from] RepoError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Grade the repository at `path`.
///
/// `display_name` overrides the repository's `user.name`; the configured
/// fallback is only used when neither is available.
pub fn grade(
    path: &Path,
    config: &GraderConfig,
    display_name: Option<String>,
) -> Result<GradeReport, GradeError> {
    let rubric = config.rubric()?;
    let repo = GitRepository::open(path)?;
    let display_name = resolve_display_name(&repo, display_name, config)?;

    let predicates = Predicates::new(&repo, config.predicate_options());
    debug!(
        "Evaluating {} rules (history limit {}, merge strategy {})",
        rubric.rules.len(),
        config.history.limit,
        config.merge.strategy
    );
    let result = rubric.evaluate(&predicates);
    info!(
        "Graded {} for {}: {}/{}",
        path.display(),
        display_name,
        result.score,
        result.max_score
    );

    Ok(GradeReport::new(display_name, path.to_path_buf(), result))
}

fn resolve_display_name(
    repo: &GitRepository,
    explicit: Option<String>,
    config: &GraderConfig,
) -> Result<String, RepoError> {
    if let Some(name) = explicit {
        return Ok(name);
    }
    match repo.display_name() {
        Err(RepoError::MissingDisplayName) => config
            .report
            .fallback_display_name
            .clone()
            .ok_or(RepoError::MissingDisplayName),
        other => other,
    }
}
