//! End-to-end CLI integration tests using test fixtures.
//!
//! Each fixture in `tests/fixtures/` contains:
//! - A `repo-manager-rules.yml` spec with paths relative to the fixture
//! - One directory per Go repository, holding its go.mod
//! - Optionally an expected.report.json (non-deterministic fields use placeholders)
//!
//! The CLI runs with the fixture as its working directory so the default
//! spec filename and the relative repository paths resolve inside it.

use assert_cmd::Command;
use camino::Utf8PathBuf;
use predicates::prelude::*;
use repomgr_test_util::normalize_nondeterministic;
use serde_json::Value;
use tempfile::TempDir;

const OUTDATED_WARNING: &str = "must: requirement `github.com/foo/bar` with AT LEAST this version `v1.2.0` is present in go.mod";

/// Helper to get a Command for the repo-manager binary.
/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
fn repo_manager_cmd() -> Command {
    let mut cmd = Command::cargo_bin("repo-manager")
        .expect("repo-manager binary not found - run `cargo build` first");
    cmd.env_remove("REPO_MANAGER_SPEC")
        .env_remove("REPO_MANAGER_PRIVATE_KEY")
        .env_remove("REPO_MANAGER_LOG");
    cmd
}

/// Absolute, symlink-free path of a fixture, matching what the binary sees as
/// its working directory.
fn fixture_dir(name: &str) -> Utf8PathBuf {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("repomgr-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
        .join(name);
    let path = path.canonicalize().expect("fixture exists");
    Utf8PathBuf::from_path_buf(path).expect("utf8 fixture path")
}

fn run_in_fixture(name: &str, args: &[&str]) -> std::process::Output {
    repo_manager_cmd()
        .current_dir(fixture_dir(name))
        .arg("run")
        .args(args)
        .output()
        .expect("Failed to run command")
}

/// Run the fixture with JSON output and return the exit code and normalized report.
fn run_json(name: &str) -> (i32, Value) {
    let output = run_in_fixture(name, &["--format", "json"]);
    let exit_code = output.status.code().unwrap_or(-1);
    let report: Value = serde_json::from_slice(&output.stdout).unwrap_or_else(|err| {
        panic!(
            "fixture '{name}' did not print a JSON report: {err}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stderr)
        )
    });
    let root = fixture_dir(name);
    (exit_code, normalize_nondeterministic(report, Some(&root)))
}

fn load_expected_report(name: &str) -> Value {
    let path = fixture_dir(name).join("expected.report.json");
    let content = std::fs::read_to_string(&path).expect("Failed to read expected report");
    serde_json::from_str(&content).expect("Failed to parse expected report")
}

fn assert_reports_match(actual: Value, expected: Value, name: &str) {
    assert_eq!(
        actual,
        expected,
        "Report mismatch for fixture '{name}'.\n\nActual:\n{}\n\nExpected:\n{}",
        serde_json::to_string_pretty(&actual).unwrap(),
        serde_json::to_string_pretty(&expected).unwrap()
    );
}

// ============================================================================
// Fixture tests
// ============================================================================

#[test]
fn fixture_clean_passes() {
    let (exit_code, report) = run_json("clean");
    assert_eq!(exit_code, 0, "clean fixture should exit with 0 (pass)");
    assert_reports_match(report, load_expected_report("clean"), "clean");
}

#[test]
fn fixture_outdated_dependency_warns() {
    let (exit_code, report) = run_json("outdated_dependency");
    assert_eq!(exit_code, 1, "a warning should exit with 1");
    assert_reports_match(
        report,
        load_expected_report("outdated_dependency"),
        "outdated_dependency",
    );
}

#[test]
fn fixture_multi_violation_keeps_spec_order() {
    let (exit_code, report) = run_json("multi_violation");
    assert_eq!(exit_code, 1);
    assert_reports_match(
        report,
        load_expected_report("multi_violation"),
        "multi_violation",
    );
}

// ============================================================================
// Output formats
// ============================================================================

#[test]
fn table_lists_one_row_per_warning() {
    repo_manager_cmd()
        .current_dir(fixture_dir("outdated_dependency"))
        .arg("run")
        .assert()
        .code(1)
        .stdout(format!("REPO\tWARN\nsvc \t{OUTDATED_WARNING}\n"));
}

#[test]
fn table_is_empty_for_clean_run() {
    repo_manager_cmd()
        .current_dir(fixture_dir("clean"))
        .arg("run")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn table_pads_repo_column_across_repos() {
    let output = run_in_fixture("multi_violation", &[]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5, "{stdout}");
    assert_eq!(lines[0], "REPO  \tWARN");
    assert!(lines[1].starts_with("api   \tmust: golang version"));
    assert!(lines[4].starts_with("worker\tmust: requirement `go.uber.org/zap`"));
}

#[test]
fn markdown_report_groups_by_repo() {
    repo_manager_cmd()
        .current_dir(fixture_dir("multi_violation"))
        .args(["run", "--format", "markdown"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("# repo-manager report"))
        .stdout(predicate::str::contains("### api"))
        .stdout(predicate::str::contains("### worker"))
        .stdout(predicate::str::contains("### tools").not());
}

#[test]
fn output_flag_writes_report_file() {
    let temp = TempDir::new().expect("temp dir");
    let out = temp.path().join("reports").join("report.json");

    repo_manager_cmd()
        .current_dir(fixture_dir("outdated_dependency"))
        .args(["run", "--format", "json", "--output"])
        .arg(&out)
        .assert()
        .code(1)
        .stdout("");

    let report: Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("report written"))
            .expect("valid json");
    assert_eq!(report["verdict"], "fail");
    assert_eq!(report["repos"][0]["warnings"][0]["message"], OUTDATED_WARNING);
}

#[test]
#[allow(deprecated)]
fn closed_stdout_is_an_error_not_a_panic() {
    use assert_cmd::cargo::CommandCargoExt;
    use std::process::Stdio;

    let mut child = std::process::Command::cargo_bin("repo-manager")
        .expect("repo-manager binary not found")
        .env_remove("REPO_MANAGER_SPEC")
        .env_remove("REPO_MANAGER_PRIVATE_KEY")
        .env_remove("REPO_MANAGER_LOG")
        .current_dir(fixture_dir("outdated_dependency"))
        .arg("run")
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn repo-manager");

    // Close the read end before the report is written.
    drop(child.stdout.take());
    let output = child.wait_with_output().expect("wait for repo-manager");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2), "stderr:\n{stderr}");
    assert!(stderr.starts_with("repo-manager: write report"), "stderr:\n{stderr}");
}

#[test]
fn spec_flag_and_env_select_the_spec_file() {
    let spec = fixture_dir("outdated_dependency").join("repo-manager-rules.yml");

    repo_manager_cmd()
        .current_dir(fixture_dir("outdated_dependency"))
        .args(["run", "--spec", spec.as_str()])
        .assert()
        .code(1);

    repo_manager_cmd()
        .current_dir(fixture_dir("outdated_dependency"))
        .env("REPO_MANAGER_SPEC", spec.as_str())
        .arg("run")
        .assert()
        .code(1);
}

// ============================================================================
// Operational errors exit with 2
// ============================================================================

fn assert_run_error(name: &str, needle: &str) {
    repo_manager_cmd()
        .current_dir(fixture_dir(name))
        .arg("run")
        .assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::starts_with("repo-manager: "))
        .stderr(predicate::str::contains(needle));
}

#[test]
fn missing_spec_file_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    repo_manager_cmd()
        .current_dir(temp.path())
        .arg("run")
        .assert()
        .code(2)
        .stderr(predicate::str::contains(
            "cannot read spec file `repo-manager-rules.yml`",
        ));
}

#[test]
fn unsupported_spec_version_is_an_error() {
    assert_run_error(
        "bad_spec_version",
        "cannot load spec: unknown spec version `2` (supported: 1)",
    );
}

#[test]
fn unknown_rule_is_an_error() {
    assert_run_error(
        "unknown_rule",
        "cannot init repo manager: cannot init policy `deps`",
    );
    assert_run_error("unknown_rule", "unknown rule: go-dep-frobnicate");
}

#[test]
fn unknown_policy_is_an_error() {
    assert_run_error("unknown_policy", "unknown policy: missing");
}

#[test]
fn unknown_repo_type_is_an_error() {
    assert_run_error("unknown_repo_type", "unknown repo type: rust");
}

#[test]
fn missing_go_mod_is_an_error() {
    assert_run_error("missing_go_mod", "cannot load repo `svc`: cannot read");
}

#[test]
fn malformed_go_mod_reports_the_line() {
    assert_run_error("malformed_go_mod", "line 4:");
}

#[test]
fn latest_for_module_without_path_is_an_error() {
    assert_run_error(
        "latest_without_path",
        "cannot derive git address from module `example.com`",
    );
}

#[test]
fn latest_with_missing_private_key_is_an_error() {
    let temp = TempDir::new().expect("temp dir");
    let key = temp.path().join("id_missing");

    repo_manager_cmd()
        .current_dir(fixture_dir("latest_missing_key"))
        .arg("run")
        .arg("--private-key")
        .arg(&key)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot init repo manager"))
        .stderr(predicate::str::contains(key.to_string_lossy().as_ref()));
}

// ============================================================================
// Explain
// ============================================================================

#[test]
fn explain_known_rule() {
    repo_manager_cmd()
        .args(["explain", "go-dep-module-min-version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Remediation"))
        .stdout(predicate::str::contains("minVersion"));
}

#[test]
fn explain_unknown_rule_lists_available_rules() {
    repo_manager_cmd()
        .args(["explain", "go-dep-frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown rule: go-dep-frobnicate"))
        .stderr(predicate::str::contains("go-dep-has-no-module"));
}
