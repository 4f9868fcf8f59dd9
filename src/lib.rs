//! checkdam - grade a git branching exercise
//!
//! Inspects a student's local repository (commit graph, branch topology and
//! working-tree files) against an ordered rubric and produces an itemized
//! report with a score. The repository is only ever read.
//!
//! # Example
//!
//! ```no_run
//! use checkdam::config::GraderConfig;
//! use std::path::Path;
//!
//! let report = checkdam::grade(Path::new("../calc-kotlin-dam"), &GraderConfig::default(), None).unwrap();
//! println!("{}: {}", report.display_name, report.score_line());
//! ```

pub mod cli;
pub mod config;
pub mod git;
mod grader;
pub mod models;
pub mod predicates;
pub mod reporters;
pub mod rubric;

pub use grader::{grade, GradeError};
