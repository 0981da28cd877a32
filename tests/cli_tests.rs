use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const CHAIN: &str = r#"{
    "id": "chain",
    "start_date": "2025-01-06",
    "tasks": [
        {"id": "A", "name": "Design", "duration_days": 5},
        {"id": "B", "name": "Build", "duration_days": 3, "predecessors": ["A"]},
        {"id": "C", "name": "Ship", "duration_days": 2, "predecessors": ["B"]}
    ]
}"#;

const CYCLE: &str = r#"{
    "id": "loop",
    "start_date": "2025-01-06",
    "tasks": [
        {"id": "A", "duration_days": 1, "predecessors": ["B"]},
        {"id": "B", "duration_days": 1, "predecessors": ["A"]}
    ]
}"#;

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn prints_table_with_summary() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "chain.json", CHAIN);
    Command::cargo_bin("cli")
        .unwrap()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "project chain: tasks=3, duration=10, critical=3, crit_path=A->B->C",
        ))
        .stdout(predicate::str::contains("| Design "))
        .stdout(predicate::str::contains("2025-01-14"));
}

#[test]
fn json_format_reports_each_project() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "chain.json", CHAIN);
    let output = Command::cargo_bin("cli")
        .unwrap()
        .args(["--format", "json"])
        .arg(&input)
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value[0]["project_id"], "chain");
    assert_eq!(value[0]["project_duration"], 10);
    assert_eq!(value[0]["schedule_data"]["B"]["early_start"], 5);
}

#[test]
fn invalid_project_exits_non_zero_with_error() {
    let dir = tempdir().unwrap();
    let good = write(dir.path(), "chain.json", CHAIN);
    let bad = write(dir.path(), "loop.json", CYCLE);
    Command::cargo_bin("cli")
        .unwrap()
        .arg(&good)
        .arg(&bad)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("project loop: invalid"))
        .stderr(predicate::str::contains("loop: Circular dependency detected"));
}

#[test]
fn csv_and_apply_outputs_are_written() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "chain.json", CHAIN);
    let csv_path = dir.path().join("out.csv");
    let applied = dir.path().join("applied.json");
    Command::cargo_bin("cli")
        .unwrap()
        .arg(&input)
        .args(["--format", "csv", "--check"])
        .arg("--output")
        .arg(&csv_path)
        .arg("--apply")
        .arg(&applied)
        .assert()
        .success()
        .stderr(predicate::str::contains("warning").not());

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(csv.starts_with("id,name,duration_days,early_start"));
    assert_eq!(csv.lines().count(), 4);

    let applied_json = fs::read_to_string(&applied).unwrap();
    let project: serde_json::Value = serde_json::from_str(&applied_json).unwrap();
    assert_eq!(project["duration_days"], 10);
    assert_eq!(project["tasks"][2]["finish_date"], "2025-01-16");
}

#[test]
fn options_file_comes_from_environment() {
    let dir = tempdir().unwrap();
    let input = write(
        dir.path(),
        "constrained.json",
        r#"{"id": "c", "start_date": "2025-01-06", "tasks": [
            {"id": "A", "duration_days": 2,
             "constraint": {"kind": "must_start_on", "date": "2025-01-16"}}
        ]}"#,
    );
    let options = write(dir.path(), "options.json", r#"{"apply_constraints": false}"#);
    Command::cargo_bin("cli")
        .unwrap()
        .env("CPM_OPTIONS", &options)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("duration=2"));
}

#[test]
fn csv_without_output_is_a_usage_error() {
    let dir = tempdir().unwrap();
    let input = write(dir.path(), "chain.json", CHAIN);
    Command::cargo_bin("cli")
        .unwrap()
        .arg(&input)
        .args(["--format", "csv"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires --output"));
}
