mod progress;
mod walker;

pub use progress::{ScanMessage, ScanProgress};
pub use walker::{DEFAULT_PROGRESS_INTERVAL, ScanConfig, Scanner, find_largest_files};
