//! Extract job metadata from JSON metadata documents.
//!
//! A metadata document is a single JSON object with the string keys `id`,
//! `url`, `started`, `completed`, `status` and `user`. Every key is required;
//! a missing key or a non-string value makes the whole document unusable.

use serde_json::{Map, Value as JsonValue};
use std::path::Path;

use crate::core::{ExtractError, FileOperation, FileResultExt};
use crate::models::{JobMetadata, config_link_for};
use crate::storage::HistoryFs;

/// Metadata extractor for job metadata documents.
///
/// Stateless: every call reads the document again and builds a fresh record.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extract the metadata record stored at `path`.
    ///
    /// Never fails. A missing document yields [`JobMetadata::default`] silently;
    /// an unreadable, malformed or incomplete one yields the default as well,
    /// after logging the reason at error level.
    pub fn extract<F>(fs: &F, path: &Path) -> JobMetadata
    where
        F: HistoryFs + ?Sized,
    {
        match Self::try_extract(fs, path) {
            Ok(Some(metadata)) => {
                tracing::debug!(
                    path = %path.display(),
                    id = %metadata.id,
                    "Successfully parsed metadata"
                );
                metadata
            }
            Ok(None) => JobMetadata::default(),
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    kind = %e.kind(),
                    "Couldn't parse metadata: {}",
                    e
                );
                JobMetadata::default()
            }
        }
    }

    /// Extract the metadata record stored at `path`, reporting why it failed.
    ///
    /// # Returns
    /// * `Ok(None)` - nothing exists at `path`
    /// * `Ok(Some(metadata))` - the fully populated record
    ///
    /// # Errors
    /// * [`ExtractError::Io`] - the document could not be read
    /// * [`ExtractError::MalformedJson`] - invalid JSON, not an object, or a non-string field
    /// * [`ExtractError::MissingField`] - a required key is absent
    pub fn try_extract<F>(fs: &F, path: &Path) -> Result<Option<JobMetadata>, ExtractError>
    where
        F: HistoryFs + ?Sized,
    {
        if !fs.exists(path) {
            return Ok(None);
        }

        let content = fs.read_to_string(path).with_file_context(
            FileOperation::Read,
            path,
            "reading job metadata",
        )?;

        Self::parse(path, &content).map(Some)
    }

    /// Parse metadata document content.
    ///
    /// The content must be exactly one JSON object; surrounding whitespace is
    /// fine, anything else after the object is malformed. `path` is only used
    /// to label errors.
    pub fn parse(path: &Path, content: &str) -> Result<JobMetadata, ExtractError> {
        let json: JsonValue =
            serde_json::from_str(content).map_err(|e| ExtractError::MalformedJson {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        let object = json.as_object().ok_or_else(|| ExtractError::MalformedJson {
            path: path.display().to_string(),
            reason: format!("expected a JSON object, found {}", json_type_name(&json)),
        })?;

        let field = |key: &str| required_str(object, path, key);

        let id = field("id")?;
        let config_link = config_link_for(&id);
        Ok(JobMetadata {
            job_link: field("url")?,
            config_link,
            started: field("started")?,
            completed: field("completed")?,
            status: field("status")?,
            user: field("user")?,
            id,
        })
    }
}

fn required_str(
    object: &Map<String, JsonValue>,
    path: &Path,
    key: &str,
) -> Result<String, ExtractError> {
    match object.get(key) {
        Some(JsonValue::String(value)) => Ok(value.clone()),
        Some(other) => Err(ExtractError::MalformedJson {
            path: path.display().to_string(),
            reason: format!("field '{key}' must be a string, found {}", json_type_name(other)),
        }),
        None => Err(ExtractError::MissingField {
            path: path.display().to_string(),
            field: key.to_string(),
        }),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
