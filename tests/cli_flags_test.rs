//! CLI flag contract tests
//!
//! Runs the compiled binary against fixture repositories to verify exit
//! codes, output formats and flags (--format, --no-emoji, --output,
//! --fail-under, --display-name, --config).

mod common;

use common::Fixture;
use std::path::Path;
use std::process::Command;

fn checkdam_bin() -> String {
    env!("CARGO_BIN_EXE_checkdam").to_string()
}

/// Run checkdam in an isolated environment and return (exit code, stdout, stderr)
fn run(cwd: &Path, args: &[&str]) -> (i32, String, String) {
    let config_home = tempfile::tempdir().unwrap();
    let output = Command::new(checkdam_bin())
        .args(args)
        .current_dir(cwd)
        .env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path())
        .env_remove("CHECKDAM_CONFIG")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute checkdam binary");

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).to_string(),
        String::from_utf8_lossy(&output.stderr).to_string(),
    )
}

#[test]
fn test_not_a_repository_exits_nonzero_without_report() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run(dir.path(), &["."]);
    assert_ne!(code, 0);
    assert!(stdout.is_empty(), "no report expected, got: {stdout}");
    assert!(stderr.contains("Not a git repository"), "stderr: {stderr}");
}

#[test]
fn test_default_command_grades_perfect_repository() {
    let (f, _) = Fixture::perfect();
    let path = f.path().to_str().unwrap();
    let (code, stdout, stderr) = run(f.path(), &[path]);

    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.starts_with("📝 Informe de Evaluación:"));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("✅")).count(), 12);
    assert!(stdout.contains("📊 Puntuación final Ada Student: 100/100"));
}

#[test]
fn test_no_emoji_markers() {
    let f = Fixture::started();
    let path = f.path().to_str().unwrap();
    let (code, stdout, _) = run(f.path(), &[path, "grade", "--no-emoji"]);

    assert_eq!(code, 0);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("[PASS]")).count(), 3);
    assert_eq!(stdout.lines().filter(|l| l.starts_with("[FAIL]")).count(), 9);
    assert!(stdout.contains("Puntuación final Ada Student: 20/100"));
    assert!(!stdout.contains('✅'));
}

#[test]
fn test_json_format() {
    let f = Fixture::started();
    let path = f.path().to_str().unwrap();
    let (code, stdout, _) = run(f.path(), &[path, "grade", "--format", "json"]);

    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["score"], 20);
    assert_eq!(parsed["max_score"], 100);
    assert_eq!(parsed["display_name"], "Ada Student");
    let outcomes = parsed["outcomes"].as_array().unwrap();
    assert_eq!(outcomes.len(), 12);
    assert_eq!(outcomes[0]["id"], "repository");
    assert_eq!(outcomes[6]["id"], "suma-branch");
    assert_eq!(outcomes[6]["passed"], true);
}

#[test]
fn test_output_file() {
    let f = Fixture::started();
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("nota.md");
    let path = f.path().to_str().unwrap();
    let (code, stdout, stderr) = run(
        f.path(),
        &[
            path,
            "grade",
            "--format",
            "markdown",
            "-o",
            out_path.to_str().unwrap(),
        ],
    );

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Report written to"));
    let written = std::fs::read_to_string(&out_path).unwrap();
    assert!(written.contains("**Puntuación final:** 20/100"));
}

#[test]
fn test_fail_under() {
    let f = Fixture::started();
    let path = f.path().to_str().unwrap();

    let (code, stdout, stderr) = run(f.path(), &[path, "grade", "--fail-under", "50"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("20/100"), "report still printed");
    assert!(stderr.contains("--fail-under=50"));

    let (code, _, _) = run(f.path(), &[path, "grade", "--fail-under", "20"]);
    assert_eq!(code, 0);
}

#[test]
fn test_display_name_override() {
    let f = Fixture::started();
    let path = f.path().to_str().unwrap();
    let (code, stdout, _) = run(f.path(), &[path, "grade", "--display-name", "Grace H."]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Puntuación final Grace H.: 20/100"));
}

#[test]
fn test_custom_rubric_config() {
    let f = Fixture::started();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("rubric.json");
    std::fs::write(
        &config_path,
        r#"{
            "rubric": {
                "max_score": 10,
                "rules": [
                    {
                        "id": "suma",
                        "points": 6,
                        "success": "suma ok",
                        "failure": "suma ko",
                        "check": { "branch_exists": "feature/suma" }
                    },
                    {
                        "id": "resta",
                        "points": 4,
                        "success": "resta ok",
                        "failure": "resta ko",
                        "check": { "branch_exists": "feature/resta" }
                    }
                ]
            }
        }"#,
    )
    .unwrap();

    let path = f.path().to_str().unwrap();
    let (code, stdout, stderr) = run(
        f.path(),
        &[path, "--config", config_path.to_str().unwrap(), "grade"],
    );
    assert_eq!(code, 0, "stderr: {stderr}");
    assert!(stdout.contains("✅ suma ok"));
    assert!(stdout.contains("❌ resta ko"));
    assert!(stdout.contains("Ada Student: 6/10"));
}

#[test]
fn test_invalid_rubric_config_aborts() {
    let f = Fixture::started();
    let config_dir = tempfile::tempdir().unwrap();
    let config_path = config_dir.path().join("checkdam.toml");
    std::fs::write(
        &config_path,
        r#"
[[rubric.rules]]
id = "only"
points = 40
success = "ok"
failure = "ko"
check = "repository_exists"
"#,
    )
    .unwrap();

    let path = f.path().to_str().unwrap();
    let (code, stdout, stderr) = run(
        f.path(),
        &[path, "--config", config_path.to_str().unwrap(), "grade"],
    );
    assert_ne!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Rule points add up to 40, but max_score is 100"), "stderr: {stderr}");
}

#[test]
fn test_config_in_working_directory_is_picked_up() {
    let f = Fixture::started();
    let cwd = tempfile::tempdir().unwrap();
    std::fs::write(
        cwd.path().join("checkdam.toml"),
        "[report]\nfallback_display_name = \"Nadie\"\n\n[expectations]\ninitial_commit = \"Otro mensaje\"\n",
    )
    .unwrap();

    let path = f.path().to_str().unwrap();
    let (code, stdout, _) = run(cwd.path(), &[path, "grade", "--no-emoji"]);
    assert_eq!(code, 0);
    // The initial commit no longer matches, so rules 2 and 7 fail.
    assert!(stdout.contains("Ada Student: 5/100"), "stdout: {stdout}");
}

#[test]
fn test_rubric_command() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run(dir.path(), &["rubric"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("division-revert"));
    assert!(stdout.contains("Total: 100/100"));

    let (code, stdout, _) = run(dir.path(), &["rubric", "--format", "json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed["rules"].as_array().unwrap().len(), 12);
}

#[test]
fn test_init_writes_example_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().to_str().unwrap();
    let (code, _, _) = run(dir.path(), &[path, "init"]);
    assert_eq!(code, 0);
    assert!(dir.path().join("checkdam.toml").exists());
}
