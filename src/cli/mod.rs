//! Command-line interface for jobhist.
//!
//! # Available Commands
//!
//! ## Single documents
//! - `metadata <FILE>` - extract a JSON metadata document
//! - `config <FILE>` - extract an XML configuration document
//!
//! ## History root
//! - `show <JOB_ID>` - metadata and configuration of one job
//! - `list` - every job with usable metadata
//!
//! # Global Options
//!
//! - `--verbose` - debug logging
//! - `--quiet` - only errors are logged
//! - `--config` - path to the settings file (also `JOBHIST_CONFIG`)
//!
//! # Example
//!
//! ```bash
//! jobhist metadata history/application_1_0001/metadata.json --format json
//! jobhist --config ./jobhist.toml list --status FAILED
//! jobhist show application_1_0001 --root /var/lib/tony/history
//! ```
//!
//! Problems with individual documents never fail a command: the affected part
//! prints empty and the reason is logged to stderr.

mod config;
mod list;
mod metadata;
pub mod output;
mod show;

pub use output::OutputFormat;
pub use show::load_record;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{CONFIG_ENV_VAR, HistoryConfig};

/// Runtime configuration for CLI execution.
///
/// Built from the parsed arguments by [`Cli::build_config`], or constructed
/// directly by tests and embedding code.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive. `None` defers to `RUST_LOG`, falling back to `info`.
    pub log_level: Option<String>,

    /// Settings file path. `None` uses the default location.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Create a configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log filter directive
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Install the global tracing subscriber, writing to stderr.
    ///
    /// Only the first call in a process has an effect.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Main CLI structure for jobhist.
#[derive(Parser)]
#[command(
    name = "jobhist",
    about = "Job history reader - inspect job metadata and configuration",
    version,
    author,
    long_about = "jobhist extracts job metadata (JSON) and job configuration (XML) records \
                  from a job history directory."
)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Log errors only
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the settings file
    #[arg(short, long, global = true, env = CONFIG_ENV_VAR)]
    config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand)]
enum Commands {
    /// Extract a job metadata document (JSON)
    Metadata(metadata::MetadataCommand),

    /// Extract a job configuration document (XML)
    Config(config::ConfigCommand),

    /// Show metadata and configuration of a job in the history root
    Show(show::ShowCommand),

    /// List jobs in the history root
    List(list::ListCommand),
}

impl Cli {
    /// Execute the CLI with configuration built from its arguments
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    ///
    /// `--verbose` maps to `debug`, `--quiet` to `error`; otherwise the level
    /// is left to `RUST_LOG`.
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
        }
    }

    /// Execute the CLI with a specific configuration
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        config.init_logging();

        let settings = HistoryConfig::load_with_optional(config.config_path.clone()).await?;

        match self.command {
            Commands::Metadata(cmd) => cmd.execute().await,
            Commands::Config(cmd) => cmd.execute(settings.xml_options()).await,
            Commands::Show(cmd) => cmd.execute(settings).await,
            Commands::List(cmd) => cmd.execute(settings).await,
        }
    }
}
