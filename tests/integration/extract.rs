//! `jobhist metadata` and `jobhist config` on single documents.

use jobhist_cli::models::{JobConfig, JobMetadata};
use jobhist_cli::test_utils::{ConfigFixture, MetadataFixture};
use predicates::prelude::*;

use crate::common::TestHistory;

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_metadata_json_output() {
    let env = TestHistory::new();
    let file = env.write_file(
        "metadata.json",
        MetadataFixture::new("application_1_0001").user("alice").status("FAILED").to_json(),
    );

    let output = env
        .jobhist()
        .args(["metadata", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let metadata: JobMetadata = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(metadata.id, "application_1_0001");
    assert_eq!(metadata.user, "alice");
    assert_eq!(metadata.status, "FAILED");
    assert_eq!(metadata.job_link, "http://rm:8088/proxy/application_1_0001");
    assert_eq!(metadata.config_link, "/jobs/application_1_0001");
}

#[test]
fn test_metadata_table_output() {
    let env = TestHistory::new();
    let file = env.write_file("metadata.json", MetadataFixture::new("job_7").to_json());

    env.jobhist()
        .arg("metadata")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("job_7"))
        .stdout(predicate::str::contains("/jobs/job_7"))
        .stdout(predicate::str::contains("SUCCEEDED"));
}

#[test]
fn test_metadata_missing_file_is_empty_and_quiet() {
    let env = TestHistory::new();

    env.jobhist()
        .args(["metadata", "nowhere.json", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"))
        .stderr(predicate::str::contains("ERROR").not());
}

#[test]
fn test_metadata_malformed_logs_error() {
    let env = TestHistory::new();
    let file = env.write_file("metadata.json", "{\"id\": \"job_1\",");

    env.jobhist()
        .args(["metadata", "--format", "json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"))
        .stderr(predicate::str::contains("Couldn't parse metadata"));
}

#[test]
fn test_metadata_missing_key_yields_empty() {
    let env = TestHistory::new();
    let file = env.write_file(
        "metadata.json",
        MetadataFixture::new("job_1").without("completed").to_json(),
    );

    env.jobhist()
        .args(["metadata", "--format", "yaml"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("{}\n"))
        .stderr(predicate::str::contains("completed"));
}

#[test]
fn test_config_json_preserves_order() {
    let env = TestHistory::new();
    let file = env.write_file(
        "config.xml",
        ConfigFixture::new()
            .property("z.last.alphabetically", "1", false, "core-default.xml")
            .property("a.first.alphabetically", "2", true, "job.xml")
            .property("m.middle", "3", false, "programmatically")
            .to_xml(),
    );

    let output = env
        .jobhist()
        .args(["config", "-f", "json"])
        .arg(&file)
        .output()
        .unwrap();
    assert!(output.status.success());

    let configs: Vec<JobConfig> = serde_json::from_str(&stdout_of(&output)).unwrap();
    let names: Vec<_> = configs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["z.last.alphabetically", "a.first.alphabetically", "m.middle"]);
    assert!(configs[1].is_final);
    assert!(!configs[0].is_final);
    assert_eq!(configs[2].source, "programmatically");
}

#[test]
fn test_config_final_only() {
    let env = TestHistory::new();
    let file = env.write_file(
        "config.xml",
        ConfigFixture::new()
            .property("a", "1", false, "s")
            .property("b", "2", true, "s")
            .to_xml(),
    );

    let output = env
        .jobhist()
        .args(["config", "--final-only", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    let configs: Vec<JobConfig> = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].name, "b");
}

#[test]
fn test_config_malformed_yields_empty_list() {
    let env = TestHistory::new();
    let file = env.write_file(
        "config.xml",
        "<configuration><property><name>a</name><value>1</value>",
    );

    env.jobhist()
        .args(["config", "--format", "json"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"))
        .stderr(predicate::str::contains("Failed to extract config"));
}

#[test]
fn test_config_missing_file_table_notice() {
    let env = TestHistory::new();

    env.jobhist()
        .args(["config", "absent.xml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No configuration properties found."));
}

#[test]
fn test_config_cdata_value_is_verbatim() {
    let env = TestHistory::new();
    let file = env.write_file(
        "config.xml",
        ConfigFixture::new()
            .property("java.opts", "<![CDATA[-Xmx1g <tuned>]]>", false, "job.xml")
            .to_xml(),
    );

    let output = env
        .jobhist()
        .args(["config", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    let configs: Vec<JobConfig> = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(configs[0].value, "-Xmx1g <tuned>");
}

#[test]
fn test_config_in_declared_latin1() {
    let env = TestHistory::new();
    let mut bytes = b"<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?>\n<configuration>\
        <property><name>greeting</name><value>ol".to_vec();
    bytes.push(0xE9);
    bytes.extend_from_slice(
        b"</value><final>false</final><source>job.xml</source></property></configuration>",
    );
    let file = env.write_file("config.xml", bytes);

    let output = env
        .jobhist()
        .args(["config", "--format", "json"])
        .arg(&file)
        .output()
        .unwrap();
    let configs: Vec<JobConfig> = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].value, "ol\u{e9}");
}
