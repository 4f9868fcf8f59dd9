//! CLI command definitions and handlers

mod grade;
mod init;
mod rubric;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// checkdam - grade a git branching exercise
#[derive(Parser, Debug)]
#[command(name = "checkdam")]
#[command(
    version,
    about = "Grade a student's git workflow against a rubric: branches, merges, commit messages and working-tree code",
    long_about = "checkdam inspects a local repository's commit graph, branch topology and \
working-tree files, checks them against an ordered rubric and prints an itemized report \
with a score out of 100.\n\n\
It only reads the repository; nothing is ever written to it.\n\n\
Run without a subcommand to grade the current directory:\n  \
checkdam .",
    after_help = "\
Examples:
  checkdam .                               Grade the current directory
  checkdam ../calc-kotlin-dam grade        Grade another repository
  checkdam . grade --format json           JSON output for collecting grades
  checkdam . grade --fail-under 50         Exit code 1 below 50 points
  checkdam . rubric                        Show the rubric being applied
  checkdam . init                          Write an example checkdam.toml"
)]
pub struct Cli {
    /// Path to the repository being graded (default: current directory)
    #[arg(global = true, default_value = ".")]
    pub path: PathBuf,

    /// Configuration file (TOML or JSON)
    #[arg(long, global = true, env = "CHECKDAM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grade the repository against the rubric (the default command)
    #[command(after_help = "\
Examples:
  checkdam . grade                               Text report with emoji markers
  checkdam . grade --no-emoji                    [PASS]/[FAIL] markers for CI logs
  checkdam . grade --format markdown -o nota.md  Markdown report written to a file
  checkdam . grade --display-name \"Ada L.\"       Override git user.name")]
    Grade {
        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json", "markdown", "md"])]
        format: String,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Disable emoji in output
        #[arg(long)]
        no_emoji: bool,

        /// Exit with code 1 if the score is below this value
        #[arg(long)]
        fail_under: Option<u32>,

        /// Name to show in the report instead of git's user.name
        #[arg(long)]
        display_name: Option<String>,
    },

    /// Show the rubric that would be applied (rules, points, checks)
    Rubric {
        /// Output format: text, toml, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "toml", "json"])]
        format: String,
    },

    /// Write an example checkdam.toml with the default expectations
    Init,

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.config.as_deref();
    match cli.command {
        Some(Commands::Grade {
            format,
            output,
            no_emoji,
            fail_under,
            display_name,
        }) => grade::run(
            &cli.path,
            config,
            &format,
            output.as_deref(),
            no_emoji,
            fail_under,
            display_name,
        ),
        Some(Commands::Rubric { format }) => rubric::run(config, &format),
        Some(Commands::Init) => init::run(&cli.path),
        Some(Commands::Version) => {
            println!("checkdam {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        None => grade::run(&cli.path, config, "text", None, false, None, None),
    }
}
