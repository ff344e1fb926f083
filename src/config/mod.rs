//! Configuration for jobhist
//!
//! jobhist reads a single user-wide TOML file describing where job history
//! lives and how its documents are named. Resolution order for the file:
//!
//! 1. `--config <path>` on the command line
//! 2. the `JOBHIST_CONFIG` environment variable
//! 3. `~/.jobhist/config.toml` (`%LOCALAPPDATA%\jobhist\config.toml` on Windows)
//!
//! See [`HistoryConfig`] for the supported keys.

pub mod global;

pub use global::{CONFIG_ENV_VAR, HistoryConfig};
