//! Structured file system error handling for jobhist
//!
//! File operations capture their context (what was being done, to which path,
//! and why) at the operation site, so diagnostics never have to parse error
//! messages after the fact.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Types of file operations performed against a history store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOperation {
    /// Reading a file completely
    Read,
    /// Opening a file as a byte stream
    Open,
    /// Reading from an already opened stream
    Stream,
}

impl std::fmt::Display for FileOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOperation::Read => write!(f, "reading"),
            FileOperation::Open => write!(f, "opening"),
            FileOperation::Stream => write!(f, "streaming"),
        }
    }
}

/// File operation error with the context it happened in
#[derive(Error, Debug)]
#[error("File operation failed: {operation} {}", file_path.display())]
pub struct FileOperationError {
    /// The type of operation that failed
    pub operation: FileOperation,
    /// The file path that was being accessed
    pub file_path: PathBuf,
    /// Why the file was being accessed
    pub purpose: String,
    /// The underlying IO error
    #[source]
    pub source: std::io::Error,
}

impl FileOperationError {
    /// Create a new file operation error
    pub fn new(
        operation: FileOperation,
        file_path: impl Into<PathBuf>,
        purpose: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self {
            operation,
            file_path: file_path.into(),
            purpose: purpose.into(),
            source,
        }
    }

    /// Get a user-friendly error message with context
    pub fn user_message(&self) -> String {
        let mut message = format!(
            "Failed {} '{}' while {}",
            self.operation,
            self.file_path.display(),
            self.purpose
        );

        match self.source.kind() {
            std::io::ErrorKind::NotFound => message.push_str(": file does not exist"),
            std::io::ErrorKind::PermissionDenied => message.push_str(": permission denied"),
            std::io::ErrorKind::InvalidData => message.push_str(": invalid data"),
            _ => {
                message.push_str(": ");
                message.push_str(&self.source.to_string());
            }
        }

        message
    }
}

/// Extension trait for Result types to add file operation context
pub trait FileResultExt<T> {
    /// Attach file operation context to an IO error
    fn with_file_context(
        self,
        operation: FileOperation,
        path: &Path,
        purpose: &str,
    ) -> Result<T, FileOperationError>;
}

impl<T> FileResultExt<T> for Result<T, std::io::Error> {
    fn with_file_context(
        self,
        operation: FileOperation,
        path: &Path,
        purpose: &str,
    ) -> Result<T, FileOperationError> {
        self.map_err(|source| FileOperationError::new(operation, path, purpose, source))
    }
}
