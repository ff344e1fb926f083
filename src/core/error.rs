//! Error handling for jobhist
//!
//! Two layers of errors live here:
//!
//! - [`ExtractError`] - why a single extraction could not produce a record. The
//!   extractors return it from their `try_extract` functions and their public
//!   `extract` boundaries turn it into an empty result plus a logged diagnostic.
//! - [`JobhistError`] - failures of the surrounding tool (configuration, job
//!   lookup) that do propagate, rendered for the terminal by
//!   [`user_friendly_error`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use jobhist_cli::core::{ExtractError, ExtractErrorKind};
//!
//! let err = ExtractError::MissingField {
//!     path: "history/job_1/metadata.json".to_string(),
//!     field: "user".to_string(),
//! };
//! assert_eq!(err.kind(), ExtractErrorKind::MissingField);
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

use super::file_error::FileOperationError;

/// Category of an extraction failure.
///
/// A path that does not exist is not a failure and has no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractErrorKind {
    /// JSON syntax error, non-well-formed XML, or a document of the wrong shape
    Malformed,
    /// The XML parser could not be set up
    ParserInit,
    /// The underlying file or stream could not be read
    Io,
    /// A required metadata key or property child is absent
    MissingField,
}

impl fmt::Display for ExtractErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractErrorKind::Malformed => write!(f, "malformed-content"),
            ExtractErrorKind::ParserInit => write!(f, "parser-initialization-failure"),
            ExtractErrorKind::Io => write!(f, "io-failure"),
            ExtractErrorKind::MissingField => write!(f, "missing-field"),
        }
    }
}

/// Reasons an extraction produced no record.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Reading the document failed
    #[error(transparent)]
    Io(#[from] FileOperationError),

    /// The metadata document is not a JSON object of strings
    #[error("Malformed metadata document {path}: {reason}")]
    MalformedJson {
        /// Path of the offending document
        path: String,
        /// Parser message
        reason: String,
    },

    /// The configuration document is not well-formed XML
    #[error("Malformed configuration document {path}: {reason}")]
    MalformedXml {
        /// Path of the offending document
        path: String,
        /// Parser message
        reason: String,
    },

    /// A required top-level metadata key is absent
    #[error("Missing field '{field}' in {path}")]
    MissingField {
        /// Path of the offending document
        path: String,
        /// The absent key
        field: String,
    },

    /// A `property` element lacks one of its expected children
    #[error("Property #{index} in {path} has no <{child}> element")]
    MissingChild {
        /// Path of the offending document
        path: String,
        /// Zero-based position of the property in document order
        index: usize,
        /// The absent child tag
        child: String,
    },

    /// The XML parser options were rejected before parsing started
    #[error("Failed to initialize XML parser: {reason}")]
    ParserInit {
        /// Why the options were rejected
        reason: String,
    },
}

impl ExtractError {
    /// Map this error to its taxonomy category.
    pub fn kind(&self) -> ExtractErrorKind {
        match self {
            ExtractError::Io(_) => ExtractErrorKind::Io,
            ExtractError::MalformedJson { .. } | ExtractError::MalformedXml { .. } => {
                ExtractErrorKind::Malformed
            }
            ExtractError::MissingField { .. } | ExtractError::MissingChild { .. } => {
                ExtractErrorKind::MissingField
            }
            ExtractError::ParserInit { .. } => ExtractErrorKind::ParserInit,
        }
    }
}

/// Failures of the jobhist tool itself.
#[derive(Error, Debug, Clone)]
pub enum JobhistError {
    /// The settings file could not be read or parsed
    #[error("Configuration error in {file}: {reason}")]
    ConfigError {
        /// Settings file path
        file: String,
        /// What went wrong
        reason: String,
    },

    /// A job id that cannot name a directory under the history root
    #[error("Invalid job id '{id}': {reason}")]
    InvalidJobId {
        /// The rejected id
        id: String,
        /// Why it was rejected
        reason: String,
    },

    /// No job directory exists for the id
    #[error("Job '{id}' not found under {root}")]
    JobNotFound {
        /// The requested id
        id: String,
        /// History root that was searched
        root: String,
    },

    /// The history root could not be listed
    #[error("Cannot list history root {root}: {reason}")]
    HistoryUnreadable {
        /// History root path
        root: String,
        /// Underlying error
        reason: String,
    },

    /// Rendering output failed
    #[error("Failed to render {format} output: {reason}")]
    OutputError {
        /// Output format name
        format: String,
        /// Serializer message
        reason: String,
    },

    /// Any other error
    #[error("{message}")]
    Other {
        /// Error message
        message: String,
    },
}

/// A [`JobhistError`] with optional user-facing details and a suggestion.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: JobhistError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details
    #[must_use]
    pub const fn new(error: JobhistError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr: error in red, details in yellow, suggestion in green.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] suitable for terminal display.
///
/// Walks the error chain looking for a [`JobhistError`] or [`FileOperationError`]
/// and attaches a suggestion that fits; anything else is wrapped as
/// [`JobhistError::Other`].
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    for cause in error.chain() {
        if let Some(jobhist_error) = cause.downcast_ref::<JobhistError>() {
            return create_error_context(jobhist_error.clone());
        }

        if let Some(file_error) = cause.downcast_ref::<FileOperationError>() {
            return ErrorContext::new(JobhistError::Other {
                message: file_error.user_message(),
            })
            .with_suggestion("Check that the path exists and is readable");
        }
    }

    let details = error
        .chain()
        .skip(1)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ");
    let context = ErrorContext::new(JobhistError::Other {
        message: error.to_string(),
    });
    if details.is_empty() {
        context
    } else {
        context.with_details(details)
    }
}

fn create_error_context(error: JobhistError) -> ErrorContext {
    match &error {
        JobhistError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Check the TOML syntax and field names in your jobhist config file")
            .with_details(
                "Supported keys are history_root, metadata_file, config_file and xml_nodes_limit",
            ),
        JobhistError::InvalidJobId { .. } => ErrorContext::new(error)
            .with_suggestion("Pass the job id exactly as it appears in the history directory"),
        JobhistError::JobNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run 'jobhist list' to see available jobs or pass --root"),
        JobhistError::HistoryUnreadable { .. } => ErrorContext::new(error)
            .with_suggestion("Check that the history root exists and is a readable directory"),
        _ => ErrorContext::new(error),
    }
}
