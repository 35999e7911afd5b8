use std::io::{self, Write};
use std::path::PathBuf;

use bigfiles_core::{AccessError, FileEntry, SizeFormat, raw_repr, render_path};

const RULE_WIDTH: usize = 60;

/// Header line of the listing
pub const LISTING_HEADER: &str = "File Size\tPath";

/// A listed file whose name could only be shown lossily
#[derive(Debug, Clone)]
pub struct DisplayError {
    pub size: u64,
    pub path: PathBuf,
}

/// Writes the size listing and the trailing error report
pub struct Reporter {
    format: SizeFormat,
    display_errors: Vec<DisplayError>,
}

impl Reporter {
    pub fn new(format: SizeFormat) -> Self {
        Self {
            format,
            display_errors: Vec::new(),
        }
    }

    pub fn display_errors(&self) -> &[DisplayError] {
        &self.display_errors
    }

    /// Write the header and one `<size>\t<path>` line per entry.
    ///
    /// Paths that are not valid UTF-8 are written lossily and remembered as
    /// display errors, including when a later write fails.
    pub fn write_listing<W: Write>(
        &mut self,
        w: &mut W,
        entries: &[FileEntry],
    ) -> io::Result<()> {
        writeln!(w, "{LISTING_HEADER}")?;
        for entry in entries {
            let rendered = render_path(entry.path());
            if rendered.is_lossy() {
                self.display_errors.push(DisplayError {
                    size: entry.size(),
                    path: entry.path().to_path_buf(),
                });
            }
            writeln!(w, "{}\t{}", self.format.render(entry.size()), rendered)?;
        }
        Ok(())
    }

    /// Whether there is anything for [`Reporter::write_error_report`] to say
    pub fn has_errors(&self, access_errors: &[AccessError]) -> bool {
        !access_errors.is_empty() || !self.display_errors().is_empty()
    }

    /// Write the error report section. Writes nothing if there are no errors.
    pub fn write_error_report<W: Write>(
        &self,
        w: &mut W,
        access_errors: &[AccessError],
    ) -> io::Result<()> {
        if !self.has_errors(access_errors) {
            return Ok(());
        }

        let rule = "=".repeat(RULE_WIDTH);
        writeln!(w)?;
        writeln!(w, "{rule}")?;
        writeln!(w, "ERROR REPORT")?;
        writeln!(w, "{rule}")?;

        if !access_errors.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{} file(s) could not be accessed (permission denied or other OS error):",
                access_errors.len()
            )?;
            for error in access_errors {
                writeln!(w, "  - {}", render_path(&error.path))?;
            }
        }

        if !self.display_errors.is_empty() {
            writeln!(w)?;
            writeln!(
                w,
                "{} file(s) with invalid Unicode characters in filename:",
                self.display_errors.len()
            )?;
            for error in &self.display_errors {
                writeln!(
                    w,
                    "  - {}\t{}",
                    self.format.render(error.size),
                    render_path(&error.path)
                )?;
                writeln!(w, "    Raw: {}", raw_repr(&error.path))?;
            }
        }

        Ok(())
    }
}
