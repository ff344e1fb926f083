//! `jobhist show` and `jobhist list` against a history root.

use jobhist_cli::models::JobMetadata;
use jobhist_cli::test_utils::{ConfigFixture, HistoryFixture, MetadataFixture};
use predicates::prelude::*;
use serde_json::Value;

use crate::common::TestHistory;

fn sample_history() -> TestHistory {
    TestHistory::with_jobs(
        &HistoryFixture::new()
            .job(
                MetadataFixture::new("application_2_0002").status("FAILED").user("bob"),
                ConfigFixture::new().property("mapreduce.job.reduces", "4", false, "job.xml"),
            )
            .job(
                MetadataFixture::new("application_1_0001").user("alice"),
                ConfigFixture::new()
                    .property("mapreduce.job.queuename", "default", true, "job.xml")
                    .property("mapreduce.job.maps", "16", false, "job.xml"),
            )
            .raw_job("application_3_0003", Some("not json".to_string()), None),
    )
}

#[test]
fn test_show_json_record() {
    let env = sample_history();

    let output = env
        .jobhist()
        .args(["show", "application_1_0001", "--format", "json", "--root"])
        .arg(env.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["metadata"]["user"], "alice");
    assert_eq!(record["metadata"]["configLink"], "/jobs/application_1_0001");
    assert_eq!(record["configs"][0]["name"], "mapreduce.job.queuename");
    assert_eq!(record["configs"][0]["final"], true);
    assert_eq!(record["configs"][1]["value"], "16");
}

#[test]
fn test_show_job_with_broken_metadata() {
    let env = sample_history();

    let output = env
        .jobhist()
        .args(["show", "application_3_0003", "-f", "json", "-r"])
        .arg(env.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let record: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["metadata"]["id"], "");
    assert_eq!(record["configs"], Value::Array(vec![]));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Couldn't parse metadata"));
}

#[test]
fn test_show_unknown_job_fails() {
    let env = sample_history();

    env.jobhist()
        .args(["show", "application_9_0009", "--root"])
        .arg(env.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"))
        .stderr(predicate::str::contains("jobhist list"));
}

#[test]
fn test_show_rejects_path_traversal() {
    let env = sample_history();

    env.jobhist()
        .args(["show", "../history", "--root"])
        .arg(env.root())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid job id"));
}

#[test]
fn test_list_skips_unusable_jobs_and_sorts() {
    let env = sample_history();

    let output = env
        .jobhist()
        .args(["list", "--format", "json", "--root"])
        .arg(env.root())
        .output()
        .unwrap();
    assert!(output.status.success());

    let jobs: Vec<JobMetadata> = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<_> = jobs.iter().map(|j| j.id.as_str()).collect();
    assert_eq!(ids, ["application_1_0001", "application_2_0002"]);
}

#[test]
fn test_list_status_filter_table() {
    let env = sample_history();

    env.jobhist()
        .args(["list", "--status", "FAILED", "--root"])
        .arg(env.root())
        .assert()
        .success()
        .stdout(predicate::str::contains("application_2_0002"))
        .stdout(predicate::str::contains("application_1_0001").not());
}

#[test]
fn test_list_missing_root_is_empty() {
    let env = TestHistory::new();

    env.jobhist()
        .args(["list", "--format", "json", "--root"])
        .arg(env.root().join("does-not-exist"))
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

#[test]
fn test_list_root_is_a_file() {
    let env = TestHistory::new();
    let file = env.write_file("not-a-dir", "x");

    env.jobhist()
        .args(["list", "--root"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot list history root"));
}
