//! Storage access for job history documents
//!
//! The extractors never touch the filesystem directly. They go through the
//! [`HistoryFs`] trait, which exposes exactly the operations they need:
//! existence checks, whole-file reads for metadata, and byte streams for
//! configuration documents.
//!
//! Two implementations ship with the crate:
//! - [`LocalFs`] - the local filesystem
//! - [`MemoryFs`] - an in-memory store with failure injection, used by tests
//!
//! # Examples
//!
//! ```rust
//! use jobhist_cli::storage::{HistoryFs, MemoryFs};
//! use std::path::Path;
//!
//! let fs = MemoryFs::new().with_file("history/job_1/metadata.json", "{}");
//! assert!(fs.exists(Path::new("history/job_1/metadata.json")));
//! assert!(fs.exists(Path::new("history/job_1")));
//! assert!(!fs.exists(Path::new("history/job_2")));
//! ```

mod local;
mod memory;

pub use local::LocalFs;
pub use memory::MemoryFs;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read access to a store holding job history documents.
///
/// Implementations must be shareable across threads; extraction calls hold
/// no state of their own and may run concurrently against the same store.
pub trait HistoryFs: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Read the whole file at `path` as UTF-8 text.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Open the file at `path` as a byte stream.
    ///
    /// The stream is released when the returned reader is dropped.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send + '_>>;

    /// List the immediate entries of the directory at `path`, sorted.
    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}
