//! Job configuration extraction.
//!
//! Turns a job's XML configuration document into an ordered list of
//! [`JobConfig`] records. See [`ConfigExtractor`] for the failure policy.

mod document;
mod encoding;
pub mod extractor;

pub use extractor::{ConfigExtractor, XmlOptions};

use std::path::Path;

use crate::models::JobConfig;
use crate::storage::HistoryFs;

/// Extract the properties at `path` with default parser settings.
pub fn extract_config<F>(fs: &F, path: &Path) -> Vec<JobConfig>
where
    F: HistoryFs + ?Sized,
{
    ConfigExtractor::new().extract(fs, path)
}
