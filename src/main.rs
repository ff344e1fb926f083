//! jobhist CLI entry point
//!
//! Parses arguments, runs the selected command and renders failures with
//! context and suggestions:
//! - `metadata` - extract a job metadata document
//! - `config` - extract a job configuration document
//! - `show` - show one job from the history root
//! - `list` - list jobs in the history root

use anyhow::Result;
use clap::Parser;
use jobhist_cli::cli;
use jobhist_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let error_ctx = user_friendly_error(e);
            error_ctx.display();
            std::process::exit(1);
        }
    }
}
