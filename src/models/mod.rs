//! Job history records
//!
//! Plain value types produced by the extractors and consumed by the
//! presentation layer. Both serialize with camelCase keys so rendered JSON
//! matches the field names used by the job-tracking UI.

use serde::{Deserialize, Serialize};

/// Prefix of every derived configuration link
pub const CONFIG_LINK_PREFIX: &str = "/jobs/";

/// Build the configuration link for a job id.
///
/// ```rust
/// use jobhist_cli::models::config_link_for;
///
/// assert_eq!(config_link_for("job_1"), "/jobs/job_1");
/// ```
pub fn config_link_for(id: &str) -> String {
    format!("{CONFIG_LINK_PREFIX}{id}")
}

/// Identity and lifecycle summary of one job run.
///
/// The default value (all fields empty) is what extraction yields when the
/// metadata document is absent or unusable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobMetadata {
    /// Unique job identifier
    pub id: String,
    /// URL of the job in the originating job-tracking system
    pub job_link: String,
    /// Always [`config_link_for`] applied to `id`, never read from input
    pub config_link: String,
    /// Start timestamp, verbatim
    pub started: String,
    /// Completion timestamp, verbatim
    pub completed: String,
    /// Terminal state label, verbatim
    pub status: String,
    /// Submitting principal
    pub user: String,
}

impl JobMetadata {
    /// Whether this is the empty record returned for missing or unusable input.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// One configuration property of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobConfig {
    /// Property key
    pub name: String,
    /// Property value, untyped
    pub value: String,
    /// True only when the source text is exactly `true`
    #[serde(rename = "final")]
    pub is_final: bool,
    /// Provenance label, e.g. the file that contributed the value
    pub source: String,
}

impl JobConfig {
    /// Interpret the text of a `<final>` element.
    ///
    /// Only the exact string `true` counts; `True`, `1` and empty text are false.
    pub fn parse_final(text: &str) -> bool {
        text == "true"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_link_for() {
        assert_eq!(config_link_for("application_1_0001"), "/jobs/application_1_0001");
        assert_eq!(config_link_for(""), "/jobs/");
    }

    #[test]
    fn test_default_metadata_is_empty() {
        let metadata = JobMetadata::default();
        assert!(metadata.is_empty());

        let populated = JobMetadata {
            id: "job_1".to_string(),
            ..Default::default()
        };
        assert!(!populated.is_empty());
    }

    #[test]
    fn test_parse_final_is_exact() {
        assert!(JobConfig::parse_final("true"));
        assert!(!JobConfig::parse_final("TRUE"));
        assert!(!JobConfig::parse_final("True"));
        assert!(!JobConfig::parse_final("1"));
        assert!(!JobConfig::parse_final(" true"));
        assert!(!JobConfig::parse_final(""));
    }

    #[test]
    fn test_serialized_field_names() {
        let metadata = JobMetadata {
            id: "job_1".to_string(),
            job_link: "http://rm/job_1".to_string(),
            config_link: config_link_for("job_1"),
            ..Default::default()
        };
        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["jobLink"], "http://rm/job_1");
        assert_eq!(json["configLink"], "/jobs/job_1");

        let config = JobConfig {
            name: "mapreduce.job.queuename".to_string(),
            value: "default".to_string(),
            is_final: true,
            source: "mapred-site.xml".to_string(),
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["final"], true);
    }
}
