//! `jobhist config` - print the properties of a single configuration document.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::output::{OutputFormat, render_configs};
use crate::jobconf::{ConfigExtractor, XmlOptions};
use crate::storage::{HistoryFs, LocalFs};

/// Extract and print a job configuration document.
///
/// Properties are printed in document order. A missing or unusable document
/// prints an empty result; the reason for an unusable one is logged to stderr.
#[derive(Args, Debug)]
pub struct ConfigCommand {
    /// Path to the XML configuration document
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Only print properties marked final
    #[arg(long)]
    pub final_only: bool,
}

impl ConfigCommand {
    /// Run against the local filesystem and print the result
    pub async fn execute(self, options: XmlOptions) -> Result<()> {
        println!("{}", self.render(&LocalFs::new(), options)?);
        Ok(())
    }

    /// Extract from `fs` and render without printing
    pub fn render<F: HistoryFs + ?Sized>(&self, fs: &F, options: XmlOptions) -> Result<String> {
        let mut configs = ConfigExtractor::with_options(options).extract(fs, &self.file);
        if self.final_only {
            configs.retain(|config| config.is_final);
        }
        render_configs(&configs, self.format)
    }
}
