//! Job metadata extraction.
//!
//! Turns a job's JSON metadata document into a [`JobMetadata`] record.
//! See [`MetadataExtractor`] for the failure policy.

pub mod extractor;

pub use extractor::MetadataExtractor;

use std::path::Path;

use crate::models::JobMetadata;
use crate::storage::HistoryFs;

/// Extract the metadata record at `path`; shorthand for [`MetadataExtractor::extract`].
pub fn extract_metadata<F>(fs: &F, path: &Path) -> JobMetadata
where
    F: HistoryFs + ?Sized,
{
    MetadataExtractor::extract(fs, path)
}
