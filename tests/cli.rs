// Integration tests for the repohealth CLI.
//
// Snapshots are generated relative to the current time so the 30/90-day
// windows line up with the binary's own clock.

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn repohealth(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("repohealth").expect("binary should exist");
    cmd.env("HOME", home).env_remove("RUST_LOG");
    cmd
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

fn healthy_snapshot() -> Value {
    let commits: Vec<Value> = (0..12)
        .map(|i| {
            json!({
                "sha": format!("c{i}"),
                "commit": { "author": { "email": format!("dev{}@acme.io", i % 6), "date": days_ago(2) } },
                "stats": { "additions": 20, "deletions": 5 },
                "files": [ { "filename": format!("src/f{i}.rs"), "additions": 20, "deletions": 5 } ]
            })
        })
        .collect();
    let issues: Vec<Value> = (1..=3)
        .map(|n| {
            json!({
                "number": n,
                "state": "closed",
                "created_at": days_ago(10),
                "updated_at": days_ago(5),
                "closed_at": days_ago(5)
            })
        })
        .collect();
    let pull_requests: Vec<Value> = (0..5)
        .map(|n| {
            json!({
                "number": 100 + n,
                "state": if n < 4 { "closed" } else { "open" },
                "created_at": days_ago(5),
                "merged_at": if n < 4 { Value::String(days_ago(3)) } else { Value::Null }
            })
        })
        .collect();
    let contributors: Vec<Value> = (0..6)
        .map(|i| json!({ "login": format!("dev{i}"), "contributions": 20 }))
        .collect();

    json!({
        "repository": "acme/widgets",
        "commits": commits,
        "issues": issues,
        "pull_requests": pull_requests,
        "contributors": contributors
    })
}

fn write_snapshot(dir: &Path, snapshot: &Value) -> PathBuf {
    let path = dir.join("snapshot.json");
    fs::write(&path, serde_json::to_string_pretty(snapshot).expect("snapshot serializes"))
        .expect("snapshot should write");
    path
}

#[test]
fn cli_version_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("repohealth"));
}

#[test]
fn cli_help_flag() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repository health scoring"));
}

#[test]
fn analyze_requires_snapshot() {
    let home = TempDir::new().expect("temp dir should be created");
    repohealth(home.path())
        .arg("analyze")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn analyze_healthy_snapshot_exits_zero_with_json_report() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());

    let output = repohealth(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let report: Value = serde_json::from_slice(&output).expect("stdout should be json");
    assert_eq!(report["repository"], "acme/widgets");
    assert_eq!(report["activity_metrics"]["commits_last_30_days"], 12);
    assert_eq!(report["contributor_metrics"]["bus_factor"], 3);
    assert_eq!(report["churn_metrics"]["score"], 100.0);
    let overall = report["health_score"]["overall"]
        .as_f64()
        .expect("overall should be a number");
    assert!((overall - 94.2).abs() < 1e-9, "unexpected overall {overall}");
}

#[test]
fn analyze_empty_snapshot_needs_attention() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &json!({}));

    repohealth(dir.path())
        .args(["analyze", "--repo", "acme/empty", "--format", "text"])
        .arg(&snapshot)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("OVERALL HEALTH SCORE: 55.5/100 (fair)"));
}

#[test]
fn analyze_without_repository_identifier_fails() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &json!({}));

    repohealth(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid repository identifier"));
}

#[test]
fn analyze_rejects_malformed_repo_flag() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());

    repohealth(dir.path())
        .args(["analyze", "--repo", "widgets"])
        .arg(&snapshot)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("owner/repo"));
}

#[test]
fn analyze_missing_snapshot_is_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");

    repohealth(dir.path())
        .arg("analyze")
        .arg(dir.path().join("absent.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn analyze_writes_output_file_and_saved_report() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());
    fs::write(
        dir.path().join("repohealth.toml"),
        r#"
[output]
format = "md"
reports_dir = "saved"
"#,
    )
    .expect("config should write");
    let out = dir.path().join("out/report.md");

    repohealth(dir.path())
        .current_dir(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .arg("--output")
        .arg(&out)
        .arg("--save-report")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("detailed report saved to"));

    let rendered = fs::read_to_string(&out).expect("output file should exist");
    assert!(rendered.contains("# Repository Health: acme/widgets"));

    let saved: Vec<_> = fs::read_dir(dir.path().join("saved"))
        .expect("reports dir should exist")
        .collect();
    assert_eq!(saved.len(), 1);
}

#[test]
fn analyze_rejects_invalid_config() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[scoring.weights]\nactivity = 3.0\n").expect("config should write");

    repohealth(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .arg("--config")
        .arg(&config)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("scoring.weights.activity"));
}

#[test]
fn analyze_rejects_oversized_churn_window() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());
    fs::write(
        dir.path().join("repohealth.toml"),
        "[analysis]\nchurn_period_days = 1000000000\n",
    )
    .expect("config should write");

    repohealth(dir.path())
        .arg("analyze")
        .arg(&snapshot)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("analysis.churn_period_days"));
}

#[test]
fn score_single_component_prints_metrics() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());

    let output = repohealth(dir.path())
        .args(["score", "contributors"])
        .arg(&snapshot)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let metrics: Value = serde_json::from_slice(&output).expect("stdout should be json");
    assert_eq!(metrics["total_contributors"], 6);
    assert_eq!(metrics["active_contributors_30_days"], 6);
    assert_eq!(metrics["score"], 74.0);
}

#[test]
fn score_rejects_unknown_component() {
    let dir = TempDir::new().expect("temp dir should be created");
    let snapshot = write_snapshot(dir.path(), &healthy_snapshot());

    repohealth(dir.path())
        .args(["score", "stars"])
        .arg(&snapshot)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn init_writes_default_config_once() {
    let dir = TempDir::new().expect("temp dir should be created");

    repohealth(dir.path())
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("repohealth.toml"));
    let written =
        fs::read_to_string(dir.path().join("repohealth.toml")).expect("config should exist");
    assert!(written.contains("[scoring.weights]"));

    repohealth(dir.path())
        .arg("init")
        .arg(dir.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("refusing to overwrite"));

    repohealth(dir.path())
        .arg("init")
        .arg(dir.path())
        .arg("--force")
        .assert()
        .success();
}
