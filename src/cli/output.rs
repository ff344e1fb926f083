//! Rendering of job records for the terminal.
//!
//! Every renderer returns the text instead of printing it so commands stay
//! testable. Empty results render as a short notice in table form and as an
//! empty object or list in JSON/YAML.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Serialize;

use crate::core::JobhistError;
use crate::history::JobRecord;
use crate::models::{JobConfig, JobMetadata};

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML
    Yaml,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

fn serialize<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value)
            .map(|s| s.trim_end().to_string())
            .map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
    };

    rendered.map_err(|reason| {
        JobhistError::OutputError {
            format: format.name().to_string(),
            reason,
        }
        .into()
    })
}

/// Render one metadata record
pub fn render_metadata(metadata: &JobMetadata, format: OutputFormat) -> Result<String> {
    if metadata.is_empty() {
        return Ok(match format {
            OutputFormat::Table => "No job metadata found.".to_string(),
            _ => "{}".to_string(),
        });
    }

    match format {
        OutputFormat::Table => Ok(metadata_table(metadata)),
        _ => serialize(metadata, format),
    }
}

/// Render configuration properties in order
pub fn render_configs(configs: &[JobConfig], format: OutputFormat) -> Result<String> {
    if configs.is_empty() {
        return Ok(match format {
            OutputFormat::Table => "No configuration properties found.".to_string(),
            _ => "[]".to_string(),
        });
    }

    match format {
        OutputFormat::Table => Ok(configs_table(configs)),
        _ => serialize(configs, format),
    }
}

/// Render metadata and configuration of one job
pub fn render_record(record: &JobRecord, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(format!(
            "{}\n\n{}\n{}",
            render_metadata(&record.metadata, format)?,
            "Configuration".bold(),
            render_configs(&record.configs, format)?
        )),
        _ => serialize(record, format),
    }
}

/// Render a job listing
pub fn render_job_list(jobs: &[JobMetadata], format: OutputFormat) -> Result<String> {
    if jobs.is_empty() {
        return Ok(match format {
            OutputFormat::Table => "No jobs found.".to_string(),
            _ => "[]".to_string(),
        });
    }

    match format {
        OutputFormat::Table => Ok(jobs_table(jobs)),
        _ => serialize(jobs, format),
    }
}

fn metadata_table(metadata: &JobMetadata) -> String {
    let rows = [
        ("Job", &metadata.id),
        ("User", &metadata.user),
        ("Status", &metadata.status),
        ("Started", &metadata.started),
        ("Completed", &metadata.completed),
        ("Job link", &metadata.job_link),
        ("Config", &metadata.config_link),
    ];

    rows.iter()
        .map(|(label, value)| {
            let label = format!("{:<10}", format!("{label}:"));
            format!("{} {}", label.bold(), value)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn configs_table(configs: &[JobConfig]) -> String {
    let name_width = column_width("NAME", configs.iter().map(|c| c.name.as_str()));
    let value_width = column_width("VALUE", configs.iter().map(|c| c.value.as_str()));

    let mut lines = vec![format!(
        "{:<name_width$}  {:<value_width$}  {:<5}  {}",
        "NAME", "VALUE", "FINAL", "SOURCE"
    )
    .bold()
    .to_string()];

    for config in configs {
        let is_final = if config.is_final { "yes" } else { "no" };
        lines.push(format!(
            "{:<name_width$}  {:<value_width$}  {:<5}  {}",
            config.name, config.value, is_final, config.source
        ));
    }

    lines.join("\n")
}

fn jobs_table(jobs: &[JobMetadata]) -> String {
    let id_width = column_width("JOB", jobs.iter().map(|j| j.id.as_str()));
    let user_width = column_width("USER", jobs.iter().map(|j| j.user.as_str()));
    let status_width = column_width("STATUS", jobs.iter().map(|j| j.status.as_str()));

    let mut lines = vec![format!(
        "{:<id_width$}  {:<user_width$}  {:<status_width$}  {}",
        "JOB", "USER", "STATUS", "STARTED"
    )
    .bold()
    .to_string()];

    for job in jobs {
        let status = match job.status.as_str() {
            "SUCCEEDED" => job.status.green().to_string(),
            "FAILED" | "KILLED" => job.status.red().to_string(),
            _ => job.status.yellow().to_string(),
        };
        // Pad before coloring so escape codes don't skew the column
        let padding = status_width.saturating_sub(job.status.chars().count());
        lines.push(format!(
            "{:<id_width$}  {:<user_width$}  {}{}  {}",
            job.id,
            job.user,
            status,
            " ".repeat(padding),
            job.started
        ));
    }

    lines.join("\n")
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values.map(|v| v.chars().count()).max().unwrap_or(0).max(header.len())
}
