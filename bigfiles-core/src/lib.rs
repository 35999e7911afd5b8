pub mod entry;
pub mod error;
pub mod render;
pub mod scanner;
pub mod size;

pub use entry::{AccessError, FileEntry, ScanResult, sort_by_size_desc};
pub use error::{BigfilesError, Result};
pub use render::{RenderedPath, raw_repr, render_path};
pub use scanner::{
    DEFAULT_PROGRESS_INTERVAL, ScanConfig, ScanMessage, ScanProgress, Scanner, find_largest_files,
};
pub use size::{HUMAN_SIZE_WIDTH, SizeFormat, format_raw, format_size};
