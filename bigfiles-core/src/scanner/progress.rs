use std::path::PathBuf;

/// Progress update during scanning
#[derive(Debug, Clone)]
pub enum ScanMessage {
    /// Periodic progress update
    Progress(ScanProgress),
    /// Traversal finished, sorting `files` entries
    Sorting { files: u64 },
    /// Scan completed
    Completed(ScanProgress),
}

/// Scanning progress statistics
#[derive(Debug, Clone, Default)]
pub struct ScanProgress {
    /// Number of files successfully sized
    pub files_scanned: u64,
    /// Number of directories visited
    pub dirs_scanned: u64,
    /// Files that could not be sized plus directories that could not be read
    pub errors: u64,
    /// Last file sized
    pub current_path: Option<PathBuf>,
}

impl ScanProgress {
    pub fn total_entries(&self) -> u64 {
        self.files_scanned + self.dirs_scanned
    }
}
