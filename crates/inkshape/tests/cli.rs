use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

const JOB: &str = r##"{
    "strokes": [
        {"points": [{"x": 0, "y": 0}, {"x": 1, "y": 1}]},
        {
            "id": "s-1",
            "points": [
                {"x": 0, "y": 0}, {"x": 25, "y": 0}, {"x": 50, "y": 0},
                {"x": 75, "y": 0}, {"x": 100, "y": 0}
            ],
            "color": "#3366ff",
            "width": 3.0,
            "timestamp": 1700000000000
        }
    ],
    "smoothing": {"resolution": 4}
}"##;

fn write_job(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("job.json");
    fs::write(&path, JOB).expect("write job");
    path
}

fn inkshape() -> Command {
    Command::cargo_bin("inkshape").expect("inkshape binary")
}

fn read_json(path: &Path) -> Value {
    let raw = fs::read_to_string(path).expect("read output");
    serde_json::from_str(&raw).expect("parse output")
}

#[test]
fn recognize_writes_a_report() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = write_job(dir.path());
    let out = dir.path().join("report.json");

    inkshape()
        .arg("recognize")
        .arg(&job)
        .arg("-o")
        .arg(&out)
        .arg("--sequential-ids")
        .assert()
        .success()
        .stdout(predicate::str::contains("s-1: line"))
        .stdout(predicate::str::contains("recognized 1/2 strokes"));

    let report = read_json(&out);
    let strokes = report["strokes"].as_array().expect("strokes array");
    assert_eq!(strokes.len(), 2);
    assert_eq!(strokes[0]["result"]["recognized"], false);
    assert_eq!(strokes[1]["result"]["shape_type"], "line");
    assert_eq!(strokes[1]["result"]["shape"]["id"], "shape-1");
    assert_eq!(strokes[1]["smoothed_point_count"], 17);
}

#[test]
fn recognize_rejects_a_bad_threshold() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = write_job(dir.path());

    inkshape()
        .arg("recognize")
        .arg(&job)
        .arg("-o")
        .arg(dir.path().join("report.json"))
        .arg("--min-confidence")
        .arg("1.5")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn smooth_honours_the_resolution_flag() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = write_job(dir.path());
    let out = dir.path().join("smoothed.json");

    inkshape()
        .arg("smooth")
        .arg(&job)
        .arg("-o")
        .arg(&out)
        .arg("--resolution")
        .arg("2")
        .assert()
        .success();

    let smoothed = read_json(&out);
    let strokes = smoothed.as_array().expect("array");
    assert_eq!(strokes[0]["points"].as_array().map(Vec::len), Some(3));
    assert_eq!(strokes[1]["stroke_id"], "s-1");
    assert_eq!(strokes[1]["input_points"], 5);
    assert_eq!(strokes[1]["points"].as_array().map(Vec::len), Some(9));
}

#[test]
fn features_prints_json_to_stdout() {
    let dir = tempfile::tempdir().expect("tempdir");
    let job = write_job(dir.path());

    let output = inkshape()
        .arg("features")
        .arg(&job)
        .output()
        .expect("run features");
    assert!(output.status.success());

    let entries: Value = serde_json::from_slice(&output.stdout).expect("stdout json");
    let entries = entries.as_array().expect("array");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["stroke_id"], "s-1");
    assert_eq!(entries[1]["features"]["point_count"], 5);
    assert_eq!(entries[1]["features"]["path_length"], 100.0);
}

#[test]
fn missing_job_fails() {
    inkshape()
        .arg("recognize")
        .arg("/nonexistent/job.json")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("error:"));
}
