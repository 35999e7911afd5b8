use std::cmp::Reverse;
use std::fmt;
use std::path::{Path, PathBuf};

/// A regular file found during a scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    size: u64,
    path: PathBuf,
}

impl FileEntry {
    pub fn new(size: u64, path: PathBuf) -> Self {
        Self { size, path }
    }

    /// Apparent size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A file whose size could not be read
#[derive(Debug, Clone)]
pub struct AccessError {
    pub path: PathBuf,
    /// OS error message, kept for logging
    pub reason: String,
}

impl AccessError {
    pub fn new(path: PathBuf, reason: impl fmt::Display) -> Self {
        Self {
            path,
            reason: reason.to_string(),
        }
    }
}

/// Outcome of a scan: sized files, largest first, plus the ones that failed
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub entries: Vec<FileEntry>,
    pub access_errors: Vec<AccessError>,
}

impl ScanResult {
    /// Keep only the first `n` entries. Access errors are left untouched.
    pub fn truncate(&mut self, n: usize) {
        self.entries.truncate(n);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(FileEntry::size).sum()
    }
}

/// Sort entries by size, largest first.
///
/// The sort is stable: files of equal size stay in discovery order.
pub fn sort_by_size_desc(entries: &mut [FileEntry]) {
    entries.sort_by_key(|e| Reverse(e.size));
}
