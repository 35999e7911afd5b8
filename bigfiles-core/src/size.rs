/// Minimum width of a right-aligned human-readable size column
pub const HUMAN_SIZE_WIDTH: usize = 10;

const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format bytes into human-readable string using 1024-based steps.
///
/// Always one fractional digit, no space before the unit. Anything at or
/// beyond 1024 TB is shown in PB, however large the number gets.
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in UNITS {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}PB")
}

/// Plain decimal byte count
pub fn format_raw(bytes: u64) -> String {
    bytes.to_string()
}

/// How sizes are rendered in listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeFormat {
    #[default]
    Raw,
    Human,
}

impl SizeFormat {
    pub fn from_human_flag(human_readable: bool) -> Self {
        if human_readable {
            SizeFormat::Human
        } else {
            SizeFormat::Raw
        }
    }

    /// Render a size as a listing column. Human sizes are right-aligned.
    pub fn render(self, bytes: u64) -> String {
        match self {
            SizeFormat::Raw => format_raw(bytes),
            SizeFormat::Human => {
                format!("{:>width$}", format_size(bytes), width = HUMAN_SIZE_WIDTH)
            }
        }
    }
}
