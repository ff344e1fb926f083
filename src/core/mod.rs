//! Core types for jobhist
//!
//! Error handling shared by every other module:
//!
//! - [`ExtractError`] / [`ExtractErrorKind`] - typed extraction failures that the
//!   extractors convert into empty results at their boundary
//! - [`JobhistError`] / [`ErrorContext`] - tool-level failures with suggestions
//! - [`FileOperationError`] - IO errors annotated with operation, path and purpose

pub mod error;
pub mod file_error;

pub use error::{
    ErrorContext, ExtractError, ExtractErrorKind, JobhistError, user_friendly_error,
};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
