//! `jobhist show` - print metadata and configuration of one job.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use super::output::{OutputFormat, render_record};
use crate::config::HistoryConfig;
use crate::core::JobhistError;
use crate::history::{JobHistory, JobRecord};
use crate::storage::{HistoryFs, LocalFs};

/// Show a job from the history root.
#[derive(Args, Debug)]
pub struct ShowCommand {
    /// Job id, i.e. the name of the job's directory under the history root
    #[arg(value_name = "JOB_ID")]
    pub job_id: String,

    /// History root, overriding the configured one
    #[arg(short = 'r', long)]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl ShowCommand {
    /// Run against the local filesystem and print the result
    pub async fn execute(self, config: HistoryConfig) -> Result<()> {
        let history = Arc::new(JobHistory::new(
            LocalFs::new(),
            config.with_history_root(self.root.clone()),
        ));
        let record = load_record(history, &self.job_id).await?;
        println!("{}", render_record(&record, self.format)?);
        Ok(())
    }
}

/// Load a job, extracting metadata and configuration concurrently.
///
/// # Errors
/// Fails if the id is invalid or no directory exists for it. Problems with the
/// documents themselves only leave the corresponding part of the record empty.
pub async fn load_record<F>(history: Arc<JobHistory<F>>, job_id: &str) -> Result<JobRecord>
where
    F: HistoryFs + 'static,
{
    if !history.contains(job_id)? {
        return Err(JobhistError::JobNotFound {
            id: job_id.to_string(),
            root: history.config().history_root.display().to_string(),
        }
        .into());
    }

    let metadata_task = {
        let history = Arc::clone(&history);
        let id = job_id.to_string();
        tokio::task::spawn_blocking(move || history.metadata(&id))
    };
    let configs_task = {
        let history = Arc::clone(&history);
        let id = job_id.to_string();
        tokio::task::spawn_blocking(move || history.configs(&id))
    };

    let (metadata, configs) = tokio::join!(metadata_task, configs_task);
    Ok(JobRecord {
        metadata: metadata.context("Metadata extraction task failed")??,
        configs: configs.context("Config extraction task failed")??,
    })
}
