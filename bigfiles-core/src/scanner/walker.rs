use std::fs::{self, FileType};
use std::io;
use std::path::Path;

use jwalk::{Parallelism, WalkDir};

use super::progress::{ScanMessage, ScanProgress};
use crate::entry::{AccessError, FileEntry, ScanResult, sort_by_size_desc};
use crate::error::{BigfilesError, Result};

/// Sized files between two progress messages
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1000;

/// Scanner configuration
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Descend into subdirectories (false = direct children only)
    pub recursive: bool,
    /// Emit a progress message every this many sized files (0 = never)
    pub progress_interval: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            recursive: true,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
        }
    }
}

/// What a traversed entry turned out to be
enum Visited {
    File(u64),
    Directory,
    Skipped,
}

/// Filesystem scanner.
///
/// Walks serially on the calling thread and keeps every sized file in memory
/// until the walk ends, so memory grows linearly with the number of files.
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan a directory and return its files, largest first
    pub fn scan(&self, root: &Path) -> Result<ScanResult> {
        self.scan_with_progress(root, |_| {})
    }

    /// Scan a directory, reporting progress to `on_message` as it goes.
    ///
    /// Only an unusable root is an error. Files that cannot be sized end up
    /// in [`ScanResult::access_errors`].
    pub fn scan_with_progress<F>(&self, root: &Path, mut on_message: F) -> Result<ScanResult>
    where
        F: FnMut(ScanMessage),
    {
        validate_root(root)?;
        tracing::debug!(
            root = %root.display(),
            recursive = self.config.recursive,
            "scan started"
        );

        let mut result = ScanResult::default();
        let mut progress = ScanProgress::default();

        let walker = WalkDir::new(root)
            .skip_hidden(false)
            .follow_links(false)
            .sort(false) // discovery order breaks ties after the size sort
            .min_depth(1)
            .parallelism(Parallelism::Serial);

        let walker = if self.config.recursive {
            walker
        } else {
            walker.max_depth(1)
        };

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(
                        path = ?e.path().map(Path::display),
                        "could not read directory: {e}"
                    );
                    progress.errors += 1;
                    continue;
                }
            };

            let path = entry.path();
            let visited = match visit(&entry.file_type(), &path, || entry.metadata()) {
                Ok(v) => v,
                Err(reason) => {
                    tracing::debug!(path = %path.display(), "could not read size: {reason}");
                    progress.errors += 1;
                    result.access_errors.push(AccessError::new(path, reason));
                    continue;
                }
            };

            match visited {
                Visited::File(size) => {
                    progress.files_scanned += 1;
                    result.entries.push(FileEntry::new(size, path.clone()));
                    progress.current_path = Some(path);

                    let interval = self.config.progress_interval;
                    if interval > 0 && progress.files_scanned % interval == 0 {
                        on_message(ScanMessage::Progress(progress.clone()));
                    }
                }
                Visited::Directory => progress.dirs_scanned += 1,
                Visited::Skipped => {}
            }
        }

        if progress.files_scanned > 0 {
            on_message(ScanMessage::Sorting {
                files: progress.files_scanned,
            });
        }
        sort_by_size_desc(&mut result.entries);

        tracing::debug!(
            files = progress.files_scanned,
            dirs = progress.dirs_scanned,
            errors = progress.errors,
            "scan finished"
        );
        on_message(ScanMessage::Completed(progress));

        Ok(result)
    }
}

/// Scan `root` with default settings, recursively or not
pub fn find_largest_files(root: &Path, recursive: bool) -> Result<ScanResult> {
    Scanner::new(ScanConfig {
        recursive,
        ..ScanConfig::default()
    })
    .scan(root)
}

fn validate_root(root: &Path) -> Result<()> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(BigfilesError::NotADirectory(root.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(BigfilesError::PathNotFound(root.to_path_buf()))
        }
        Err(source) => Err(BigfilesError::RootUnreadable {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Classify an entry and read its size if it is a file.
///
/// Symlinks are resolved: a link to a regular file is sized by its target,
/// and a link whose target cannot be stat'ed is an error.
fn visit<M, E>(
    file_type: &FileType,
    path: &Path,
    metadata: M,
) -> std::result::Result<Visited, String>
where
    M: FnOnce() -> std::result::Result<fs::Metadata, E>,
    E: std::fmt::Display,
{
    if file_type.is_dir() {
        Ok(Visited::Directory)
    } else if file_type.is_file() {
        metadata()
            .map(|m| Visited::File(m.len()))
            .map_err(|e| e.to_string())
    } else if file_type.is_symlink() {
        match fs::metadata(path) {
            Ok(target) if target.is_file() => Ok(Visited::File(target.len())),
            Ok(_) => Ok(Visited::Skipped),
            Err(e) => Err(e.to_string()),
        }
    } else {
        Ok(Visited::Skipped)
    }
}
