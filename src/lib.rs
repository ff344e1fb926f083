//! jobhist - job history reader
//!
//! Extracts structured records from the documents a job history directory
//! keeps for each job:
//! - a JSON metadata document, yielding one [`JobMetadata`](models::JobMetadata)
//! - an XML configuration document, yielding an ordered list of
//!   [`JobConfig`](models::JobConfig) properties
//!
//! Extraction never fails from the caller's point of view. A missing document
//! yields the empty value; an unreadable or malformed one yields the empty value
//! and an error event through `tracing`.
//!
//! # Core Modules
//!
//! - [`models`] - the extracted record types
//! - [`metadata`] - JSON metadata extraction
//! - [`jobconf`] - XML configuration extraction
//! - [`storage`] - the [`HistoryFs`](storage::HistoryFs) seam, local and in-memory
//! - [`history`] - job directories under a history root
//!
//! ## Supporting Modules
//! - [`config`] - tool settings (`~/.jobhist/config.toml`)
//! - [`core`] - error types and user-facing error rendering
//! - [`cli`] - the `jobhist` command line
//!
//! # Example
//!
//! ```rust,no_run
//! use jobhist_cli::storage::LocalFs;
//! use jobhist_cli::{extract_config, extract_metadata};
//! use std::path::Path;
//!
//! let fs = LocalFs::new();
//! let metadata = extract_metadata(&fs, Path::new("history/job_1/metadata.json"));
//! let configs = extract_config(&fs, Path::new("history/job_1/config.xml"));
//! println!("{} ran as {} with {} properties", metadata.id, metadata.user, configs.len());
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod history;
pub mod jobconf;
pub mod metadata;
pub mod models;
pub mod storage;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use jobconf::extract_config;
pub use metadata::extract_metadata;
