//! In-memory store with failure injection.

use std::collections::{BTreeMap, BTreeSet};
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::HistoryFs;

#[derive(Debug, Clone)]
enum MemoryEntry {
    File(Vec<u8>),
    /// Exists, but every read fails
    Unreadable,
    /// Streams the bytes, then fails instead of reporting end of file
    Truncated(Vec<u8>),
}

/// [`HistoryFs`] holding files in memory.
///
/// Directories are implicit: a path exists as a directory when some file lives
/// below it. Readers returned by [`HistoryFs::open`] are counted while alive,
/// see [`MemoryFs::open_readers`].
#[derive(Debug, Default)]
pub struct MemoryFs {
    entries: BTreeMap<PathBuf, MemoryEntry>,
    open_readers: Arc<AtomicUsize>,
}

impl MemoryFs {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert_file`](Self::insert_file)
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.insert_file(path, contents);
        self
    }

    /// Add or replace a file
    pub fn insert_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), MemoryEntry::File(contents.into()));
    }

    /// Add a file that exists but cannot be read
    pub fn insert_unreadable(&mut self, path: impl Into<PathBuf>) {
        self.entries.insert(path.into(), MemoryEntry::Unreadable);
    }

    /// Add a file whose stream yields `prefix` and then an IO error
    pub fn insert_truncated(&mut self, path: impl Into<PathBuf>, prefix: impl Into<Vec<u8>>) {
        self.entries.insert(path.into(), MemoryEntry::Truncated(prefix.into()));
    }

    /// Remove a file, returning whether it was present
    pub fn remove(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    /// Number of readers handed out by `open` that have not been dropped yet
    pub fn open_readers(&self) -> usize {
        self.open_readers.load(Ordering::SeqCst)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entries.keys().any(|key| key != path && key.starts_with(path))
    }

    fn entry(&self, path: &Path) -> io::Result<&MemoryEntry> {
        match self.entries.get(path) {
            Some(entry) => Ok(entry),
            None if self.is_dir(path) => Err(io::Error::other(format!(
                "{} is a directory",
                path.display()
            ))),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )),
        }
    }
}

fn unreadable(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{} is not readable", path.display()),
    )
}

impl HistoryFs for MemoryFs {
    fn exists(&self, path: &Path) -> bool {
        self.entries.contains_key(path) || self.is_dir(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        match self.entry(path)? {
            MemoryEntry::File(bytes) => String::from_utf8(bytes.clone())
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e)),
            MemoryEntry::Unreadable => Err(unreadable(path)),
            MemoryEntry::Truncated(_) => Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream interrupted",
            )),
        }
    }

    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send + '_>> {
        let (bytes, fail_at_end) = match self.entry(path)? {
            MemoryEntry::File(bytes) => (bytes.clone(), false),
            MemoryEntry::Truncated(bytes) => (bytes.clone(), true),
            MemoryEntry::Unreadable => return Err(unreadable(path)),
        };

        self.open_readers.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(CountedReader {
            inner: Cursor::new(bytes),
            fail_at_end,
            open_readers: Arc::clone(&self.open_readers),
        }))
    }

    fn list_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(path) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", path.display()),
            ));
        }

        let children: BTreeSet<PathBuf> = self
            .entries
            .keys()
            .filter_map(|key| key.strip_prefix(path).ok())
            .filter_map(|rest| rest.components().next())
            .map(|first| path.join(first))
            .collect();
        Ok(children.into_iter().collect())
    }
}

struct CountedReader {
    inner: Cursor<Vec<u8>>,
    fail_at_end: bool,
    open_readers: Arc<AtomicUsize>,
}

impl Read for CountedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 && self.fail_at_end && !buf.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "stream interrupted",
            ));
        }
        Ok(n)
    }
}

impl Drop for CountedReader {
    fn drop(&mut self) {
        self.open_readers.fetch_sub(1, Ordering::SeqCst);
    }
}
