//! `jobhist metadata` - print the metadata record of a single document.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::output::{OutputFormat, render_metadata};
use crate::metadata::MetadataExtractor;
use crate::storage::{HistoryFs, LocalFs};

/// Extract and print a job metadata document.
///
/// A missing or unusable document prints an empty result; the reason for an
/// unusable one is logged to stderr.
#[derive(Args, Debug)]
pub struct MetadataCommand {
    /// Path to the JSON metadata document
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl MetadataCommand {
    /// Run against the local filesystem and print the result
    pub async fn execute(self) -> Result<()> {
        println!("{}", self.render(&LocalFs::new())?);
        Ok(())
    }

    /// Extract from `fs` and render without printing
    pub fn render<F: HistoryFs + ?Sized>(&self, fs: &F) -> Result<String> {
        let metadata = MetadataExtractor::extract(fs, &self.file);
        render_metadata(&metadata, self.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryFs;

    #[test]
    fn test_render_json() {
        let fs = MemoryFs::new().with_file(
            "m.json",
            r#"{"id":"job_5","url":"u","started":"s","completed":"c","status":"RUNNING","user":"dana"}"#,
        );
        let cmd = MetadataCommand {
            file: PathBuf::from("m.json"),
            format: OutputFormat::Json,
        };

        let rendered = cmd.render(&fs).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(json["id"], "job_5");
        assert_eq!(json["configLink"], "/jobs/job_5");
    }

    #[test]
    fn test_render_missing_file() {
        let cmd = MetadataCommand {
            file: PathBuf::from("absent.json"),
            format: OutputFormat::Table,
        };
        assert_eq!(cmd.render(&MemoryFs::new()).unwrap(), "No job metadata found.");
    }
}
