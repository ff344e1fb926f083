//! `jobhist list` - list jobs under the history root.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::output::{OutputFormat, render_job_list};
use crate::config::HistoryConfig;
use crate::history::JobHistory;
use crate::storage::{HistoryFs, LocalFs};

/// List every job with usable metadata, sorted by id.
#[derive(Args, Debug)]
pub struct ListCommand {
    /// History root, overriding the configured one
    #[arg(short = 'r', long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only list jobs with this status, e.g. FAILED
    #[arg(long)]
    pub status: Option<String>,
}

impl ListCommand {
    /// Run against the local filesystem and print the result
    pub async fn execute(self, config: HistoryConfig) -> Result<()> {
        println!("{}", self.render(LocalFs::new(), config)?);
        Ok(())
    }

    /// List jobs in `fs` and render without printing
    pub fn render<F: HistoryFs>(&self, fs: F, config: HistoryConfig) -> Result<String> {
        let history = JobHistory::new(fs, config.with_history_root(self.root.clone()));
        let mut jobs = history.list()?;
        if let Some(status) = &self.status {
            jobs.retain(|job| &job.status == status);
        }
        render_job_list(&jobs, self.format)
    }
}
