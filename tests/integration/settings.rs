//! Settings file handling and global flags.

use jobhist_cli::models::JobMetadata;
use jobhist_cli::test_utils::{ConfigFixture, HistoryFixture, MetadataFixture};
use predicates::prelude::*;

use crate::common::TestHistory;

fn one_job() -> TestHistory {
    TestHistory::with_jobs(&HistoryFixture::new().job(
        MetadataFixture::new("job_1"),
        ConfigFixture::new().property("a", "1", true, "s"),
    ))
}

#[test]
fn test_history_root_from_settings() {
    let env = one_job();
    env.write_settings(&format!("history_root = {:?}\n", env.root().display().to_string()));

    let output = env.jobhist().args(["list", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let jobs: Vec<JobMetadata> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].id, "job_1");
}

#[test]
fn test_default_history_root_is_relative() {
    // The command runs inside the temp dir, whose "history" folder is the root
    let env = one_job();

    env.jobhist()
        .args(["show", "job_1", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"configLink\": \"/jobs/job_1\""));
}

#[test]
fn test_custom_document_names() {
    let env = TestHistory::new();
    let dir = env.root().join("job_5");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("job.json"), MetadataFixture::new("job_5").to_json()).unwrap();
    env.write_settings(&format!(
        "history_root = {:?}\nmetadata_file = \"job.json\"\n",
        env.root().display().to_string()
    ));

    env.jobhist()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("job_5"));
}

#[test]
fn test_unknown_settings_key_fails() {
    let env = one_job();
    env.write_settings("history_rot = \"typo\"\n");

    env.jobhist()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_zero_node_limit_fails_config_extraction() {
    let env = one_job();
    env.write_settings("xml_nodes_limit = 0\n");

    env.jobhist()
        .args(["config", "--format", "json"])
        .arg(env.job_file("job_1", "config.xml"))
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"))
        .stderr(predicate::str::contains("parser"));
}

#[test]
fn test_config_flag_overrides_env() {
    let env = one_job();
    // The env var points at a broken file; the flag points at a valid one
    env.write_settings("not valid toml [");
    let good = env.write_file("good.toml", "xml_nodes_limit = 100000\n");

    env.jobhist()
        .arg("--config")
        .arg(&good)
        .args(["config", "--format", "json"])
        .arg(env.job_file("job_1", "config.xml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"a\""));
}

#[test]
fn test_quiet_still_reports_extraction_errors() {
    let env = TestHistory::new();
    let file = env.write_file("metadata.json", "[1, 2, 3]");

    env.jobhist()
        .args(["--quiet", "metadata", "--format", "json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"))
        .stderr(predicate::str::contains("Couldn't parse metadata"));
}

#[test]
fn test_verbose_logs_successful_parse() {
    let env = TestHistory::new();
    let file = env.write_file("metadata.json", MetadataFixture::new("job_2").to_json());

    env.jobhist()
        .args(["metadata", "-v", "--format", "json"])
        .arg(&file)
        .assert()
        .success()
        .stderr(predicate::str::contains("Successfully parsed metadata"));
}
