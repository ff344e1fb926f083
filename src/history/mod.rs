//! Job history directory access.
//!
//! A history root holds one directory per job, named after the job id, with
//! the job's metadata and configuration documents inside:
//!
//! ```text
//! history/
//! ├── application_1700000000000_0001/
//! │   ├── metadata.json
//! │   └── config.xml
//! └── application_1700000000000_0002/
//!     └── metadata.json
//! ```
//!
//! [`JobHistory`] resolves those paths from a [`HistoryConfig`] and runs the
//! extractors on them. Like the extractors, it treats absent documents as empty
//! data; only an unusable job id or an unlistable root is an error.

use serde::Serialize;
use std::path::{Component, Path, PathBuf};

use crate::config::HistoryConfig;
use crate::core::JobhistError;
use crate::jobconf::ConfigExtractor;
use crate::metadata::MetadataExtractor;
use crate::models::{JobConfig, JobMetadata};
use crate::storage::HistoryFs;

/// Everything known about one job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JobRecord {
    /// Metadata, empty when the document is absent or unusable
    pub metadata: JobMetadata,
    /// Configuration properties in document order
    pub configs: Vec<JobConfig>,
}

/// Reader for a job history root.
pub struct JobHistory<F> {
    fs: F,
    config: HistoryConfig,
    extractor: ConfigExtractor,
}

impl<F: HistoryFs> JobHistory<F> {
    /// Create a reader over `fs` using the layout described by `config`
    pub fn new(fs: F, config: HistoryConfig) -> Self {
        let extractor = ConfigExtractor::with_options(config.xml_options());
        Self {
            fs,
            config,
            extractor,
        }
    }

    /// The settings in use
    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// Directory holding the documents of job `id`.
    ///
    /// # Errors
    /// [`JobhistError::InvalidJobId`] if `id` is not a single plain path component.
    pub fn job_dir(&self, id: &str) -> Result<PathBuf, JobhistError> {
        validate_job_id(id)?;
        Ok(self.config.history_root.join(id))
    }

    /// Path of the metadata document of job `id`
    pub fn metadata_path(&self, id: &str) -> Result<PathBuf, JobhistError> {
        Ok(self.job_dir(id)?.join(&self.config.metadata_file))
    }

    /// Path of the configuration document of job `id`
    pub fn config_path(&self, id: &str) -> Result<PathBuf, JobhistError> {
        Ok(self.job_dir(id)?.join(&self.config.config_file))
    }

    /// Whether a directory exists for job `id`
    pub fn contains(&self, id: &str) -> Result<bool, JobhistError> {
        Ok(self.fs.exists(&self.job_dir(id)?))
    }

    /// Metadata of job `id`; empty when the document is absent or unusable
    pub fn metadata(&self, id: &str) -> Result<JobMetadata, JobhistError> {
        let path = self.metadata_path(id)?;
        Ok(MetadataExtractor::extract(&self.fs, &path))
    }

    /// Configuration of job `id`; empty when the document is absent or unusable
    pub fn configs(&self, id: &str) -> Result<Vec<JobConfig>, JobhistError> {
        let path = self.config_path(id)?;
        Ok(self.extractor.extract(&self.fs, &path))
    }

    /// Metadata and configuration of job `id`
    pub fn load(&self, id: &str) -> Result<JobRecord, JobhistError> {
        Ok(JobRecord {
            metadata: self.metadata(id)?,
            configs: self.configs(id)?,
        })
    }

    /// Metadata of every job under the history root, sorted by id.
    ///
    /// Jobs whose metadata comes back empty are skipped. A missing root yields
    /// an empty list.
    ///
    /// # Errors
    /// [`JobhistError::HistoryUnreadable`] if the root exists but cannot be listed.
    pub fn list(&self) -> Result<Vec<JobMetadata>, JobhistError> {
        let root = &self.config.history_root;
        if !self.fs.exists(root) {
            tracing::debug!(root = %root.display(), "History root does not exist");
            return Ok(Vec::new());
        }

        let entries = self.fs.list_dir(root).map_err(|e| JobhistError::HistoryUnreadable {
            root: root.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut jobs: Vec<JobMetadata> = entries
            .iter()
            .map(|dir| MetadataExtractor::extract(&self.fs, &dir.join(&self.config.metadata_file)))
            .filter(|metadata| !metadata.is_empty())
            .collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(root = %root.display(), jobs = jobs.len(), "Listed job history");
        Ok(jobs)
    }
}

/// Check that `id` can name a directory directly under the history root.
///
/// # Errors
/// [`JobhistError::InvalidJobId`] for empty ids, ids with separators, `.`/`..`,
/// or absolute paths.
pub fn validate_job_id(id: &str) -> Result<(), JobhistError> {
    let invalid = |reason: &str| JobhistError::InvalidJobId {
        id: id.to_string(),
        reason: reason.to_string(),
    };

    if id.trim().is_empty() {
        return Err(invalid("job id is empty"));
    }
    if id.contains('/') || id.contains('\\') {
        return Err(invalid("job id must not contain path separators"));
    }

    let mut components = Path::new(id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(()),
        _ => Err(invalid("job id must be a plain directory name")),
    }
}
