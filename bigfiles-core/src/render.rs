//! Rendering paths as text when the name may not be valid UTF-8.
//!
//! Filenames on Unix are arbitrary bytes and on Windows arbitrary UTF-16, so
//! turning a path into output text can fail. [`render_path`] never fails: it
//! hands back the exact text when it exists and a lossy substitute otherwise,
//! and says which one it produced.

use std::borrow::Cow;
use std::fmt;
use std::path::Path;

/// Text form of a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedPath<'a> {
    /// The path is valid UTF-8 and is shown as-is
    Exact(&'a str),
    /// Invalid sequences were replaced with U+FFFD
    Lossy(String),
}

impl RenderedPath<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            RenderedPath::Exact(s) => s,
            RenderedPath::Lossy(s) => s,
        }
    }

    pub fn is_lossy(&self) -> bool {
        matches!(self, RenderedPath::Lossy(_))
    }
}

impl fmt::Display for RenderedPath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a path for output, falling back to a lossy rendering
pub fn render_path(path: &Path) -> RenderedPath<'_> {
    match path.as_os_str().to_string_lossy() {
        Cow::Borrowed(s) => RenderedPath::Exact(s),
        Cow::Owned(s) => RenderedPath::Lossy(s),
    }
}

/// Escaped debug form of a path, with undecodable bytes spelled out (`\xFF`)
pub fn raw_repr(path: &Path) -> String {
    format!("{:?}", path.as_os_str())
}
