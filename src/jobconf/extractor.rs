//! Extract job configuration properties from XML configuration documents.
//!
//! The document lists `property` elements, each with `name`, `value`, `final`
//! and `source` children:
//!
//! ```xml
//! <configuration>
//!   <property>
//!     <name>mapreduce.job.queuename</name>
//!     <value>default</value>
//!     <final>false</final>
//!     <source>mapred-site.xml</source>
//!   </property>
//! </configuration>
//! ```
//!
//! Properties are collected from any depth, in document order. Children are
//! looked up among all descendants of the property and the first match wins.
//! Tags are matched on the name as written: `<x:property>` is not a property,
//! and namespace declarations are never interpreted.
//!
//! The character encoding comes from the byte order mark or the XML
//! declaration and defaults to UTF-8.

use std::io::Read;
use std::path::Path;

use super::document::{Element, XmlDocument};
use super::encoding::decode_document;
use crate::core::{ExtractError, FileOperation, FileResultExt};
use crate::models::JobConfig;
use crate::storage::HistoryFs;

const PROPERTY_TAG: &str = "property";

/// Settings for the XML parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XmlOptions {
    /// Accept documents carrying a DTD
    pub allow_dtd: bool,
    /// Maximum number of element and text nodes a document may contain;
    /// must be non-zero
    pub nodes_limit: u32,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            allow_dtd: true,
            nodes_limit: u32::MAX,
        }
    }
}

impl XmlOptions {
    /// Check that a parser can be set up with these settings.
    ///
    /// # Errors
    /// [`ExtractError::ParserInit`] when `nodes_limit` is zero.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.nodes_limit == 0 {
            return Err(ExtractError::ParserInit {
                reason: "nodes limit must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Configuration extractor for job configuration documents.
#[derive(Debug, Clone, Default)]
pub struct ConfigExtractor {
    options: XmlOptions,
}

impl ConfigExtractor {
    /// Create an extractor with default parser settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an extractor with custom parser settings
    pub fn with_options(options: XmlOptions) -> Self {
        Self { options }
    }

    /// Extract the configuration properties stored at `path`, in document order.
    ///
    /// Never fails. A missing document yields an empty list silently. Any
    /// failure yields an empty list after logging the reason at error level;
    /// properties parsed before the failure are discarded.
    pub fn extract<F>(&self, fs: &F, path: &Path) -> Vec<JobConfig>
    where
        F: HistoryFs + ?Sized,
    {
        match self.try_extract(fs, path) {
            Ok(Some(configs)) => {
                tracing::debug!(
                    path = %path.display(),
                    properties = configs.len(),
                    "Successfully parsed config"
                );
                configs
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!(
                    path = %path.display(),
                    kind = %e.kind(),
                    "Failed to extract config: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    /// Extract the configuration properties stored at `path`, reporting why it failed.
    ///
    /// The stream opened for `path` is dropped before this returns, whatever
    /// the outcome.
    ///
    /// # Returns
    /// * `Ok(None)` - nothing exists at `path`
    /// * `Ok(Some(configs))` - one record per property element
    ///
    /// # Errors
    /// * [`ExtractError::Io`] - the stream could not be opened or read
    /// * [`ExtractError::ParserInit`] - the parser settings are invalid
    /// * [`ExtractError::MalformedXml`] - the document cannot be decoded or is not well-formed XML
    /// * [`ExtractError::MissingChild`] - a property lacks a required child
    pub fn try_extract<F>(
        &self,
        fs: &F,
        path: &Path,
    ) -> Result<Option<Vec<JobConfig>>, ExtractError>
    where
        F: HistoryFs + ?Sized,
    {
        if !fs.exists(path) {
            return Ok(None);
        }

        let bytes = {
            let mut stream = fs.open(path).with_file_context(
                FileOperation::Open,
                path,
                "parsing job configuration",
            )?;
            let mut bytes = Vec::new();
            stream.read_to_end(&mut bytes).with_file_context(
                FileOperation::Stream,
                path,
                "parsing job configuration",
            )?;
            bytes
        };

        self.parse(path, &bytes).map(Some)
    }

    /// Parse configuration document bytes.
    ///
    /// `path` is only used to label errors.
    pub fn parse(&self, path: &Path, bytes: &[u8]) -> Result<Vec<JobConfig>, ExtractError> {
        self.options.validate()?;

        let malformed = |reason: String| ExtractError::MalformedXml {
            path: path.display().to_string(),
            reason,
        };

        let text = decode_document(bytes).map_err(malformed)?;
        let doc = XmlDocument::parse(&text, &self.options).map_err(malformed)?;

        doc.elements()
            .filter(|element| element.name() == PROPERTY_TAG)
            .enumerate()
            .map(|(index, property)| -> Result<JobConfig, ExtractError> {
                let child = |tag: &str| {
                    first_descendant_text(property, tag).ok_or_else(|| ExtractError::MissingChild {
                        path: path.display().to_string(),
                        index,
                        child: tag.to_string(),
                    })
                };

                Ok(JobConfig {
                    name: child("name")?,
                    value: child("value")?,
                    is_final: JobConfig::parse_final(&child("final")?),
                    source: child("source")?,
                })
            })
            .collect()
    }
}

/// Text content of the first descendant element named `tag`, if any.
fn first_descendant_text(element: Element<'_>, tag: &str) -> Option<String> {
    element
        .descendants()
        .find(|child| child.name() == tag)
        .map(Element::text_content)
}
