mod report;

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bigfiles_core::{
    BigfilesError, FileEntry, ScanConfig, ScanMessage, Scanner, SizeFormat, render_path,
};
use clap::Parser;
use color_eyre::Result;
use tracing::Level;

use report::Reporter;

const EXAMPLES: &str = "\
Examples:
  bigfiles                    # List all files in current directory (recursive)
  bigfiles /path/to/dir       # List all files in specified directory (recursive)
  bigfiles -n 10              # Show only top 10 largest files
  bigfiles --human-readable   # Show sizes in human-readable format
  bigfiles --no-recursive     # Scan only the directory itself, not subdirectories
  bigfiles -o sizes.txt       # Save the listing to a file";

/// bigfiles - list all files in a directory in descending size order
#[derive(Parser, Debug)]
#[command(name = "bigfiles")]
#[command(about = "List all files in a directory in descending size order")]
#[command(version, after_help = EXAMPLES)]
struct Args {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    directory: PathBuf,

    /// Show only the top N largest files
    #[arg(short, long, value_name = "N")]
    num: Option<usize>,

    /// Display file sizes in human-readable format (KB, MB, GB, etc.)
    #[arg(short = 'H', long)]
    human_readable: bool,

    /// Only scan the specified directory, not subdirectories
    #[arg(long)]
    no_recursive: bool,

    /// Save results to a file instead of printing to stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Don't print scan progress
    #[arg(short, long)]
    quiet: bool,

    /// Increase diagnostic logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.verbose);

    let mut out = BufWriter::new(io::stdout().lock());
    let code = run(&args, &mut out, &mut io::stderr().lock())?;
    drop(out);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

/// Diagnostics go to stderr so the listing on stdout stays parseable
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Scan, list and report. Returns the process exit code.
fn run<O: Write, E: Write>(args: &Args, out: &mut O, err: &mut E) -> Result<i32> {
    let scanner = Scanner::new(ScanConfig {
        recursive: !args.no_recursive,
        ..ScanConfig::default()
    });

    let quiet = args.quiet;
    let scanned = scanner.scan_with_progress(&args.directory, |msg| {
        if !quiet {
            print_progress(err, &msg);
        }
    });

    let mut result = match scanned {
        Ok(r) => r,
        Err(e) => {
            writeln!(err, "Error: {e}")?;
            return Ok(1);
        }
    };

    tracing::info!(
        files = result.entries.len(),
        bytes = result.total_size(),
        access_errors = result.access_errors.len(),
        "scan result"
    );

    if let Some(n) = args.num {
        result.truncate(n);
    }

    let mut reporter = Reporter::new(SizeFormat::from_human_flag(args.human_readable));

    if result.is_empty() {
        writeln!(out, "No files found in '{}'", render_path(&args.directory))?;
    } else {
        match &args.output {
            Some(dest) => match write_listing_to_file(&mut reporter, dest, &result.entries) {
                Ok(()) => writeln!(out, "Results saved to '{}'", render_path(dest))?,
                Err(e) => writeln!(err, "Error: {e}")?,
            },
            None => reporter.write_listing(out, &result.entries)?,
        }
    }

    reporter.write_error_report(out, &result.access_errors)?;
    out.flush()?;

    Ok(0)
}

/// Write the listing to `dest`. Failures end the listing but not the run.
fn write_listing_to_file(
    reporter: &mut Reporter,
    dest: &Path,
    entries: &[FileEntry],
) -> std::result::Result<(), BigfilesError> {
    let file = File::create(dest).map_err(|source| BigfilesError::OutputFile {
        path: dest.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %dest.display(), entries = entries.len(), "writing listing");

    let mut writer = BufWriter::new(file);
    reporter
        .write_listing(&mut writer, entries)
        .and_then(|()| writer.flush())
        .map_err(|source| BigfilesError::OutputWrite {
            path: dest.to_path_buf(),
            source,
        })
}

fn print_progress<E: Write>(err: &mut E, msg: &ScanMessage) {
    let _ = match msg {
        ScanMessage::Progress(p) => writeln!(err, "Scanned {} files...", p.files_scanned),
        ScanMessage::Sorting { files } => {
            writeln!(err, "Scanned {files} files total. Sorting...")
        }
        ScanMessage::Completed(p) => {
            tracing::info!(
                files = p.files_scanned,
                entries = p.total_entries(),
                errors = p.errors,
                "scan complete"
            );
            Ok(())
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    struct Outcome {
        code: i32,
        out: String,
        err: String,
    }

    fn run_with(argv: &[&str]) -> Outcome {
        let args = Args::try_parse_from(std::iter::once("bigfiles").chain(argv.iter().copied()))
            .unwrap();
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(&args, &mut out, &mut err).unwrap();
        Outcome {
            code,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    fn three_files() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::write(temp.path().join("b.txt"), "bb").unwrap();
        fs::write(temp.path().join("c.txt"), "ccc").unwrap();
        temp
    }

    fn dir_arg(temp: &TempDir) -> &str {
        temp.path().to_str().unwrap()
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["bigfiles"]).unwrap();
        assert_eq!(args.directory, PathBuf::from("."));
        assert_eq!(args.num, None);
        assert!(!args.human_readable);
        assert!(!args.no_recursive);
        assert!(args.output.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_args_flags() {
        let args = Args::try_parse_from([
            "bigfiles", "/tmp", "-n", "5", "-H", "--no-recursive", "-o", "out.txt", "-vv",
        ])
        .unwrap();
        assert_eq!(args.directory, PathBuf::from("/tmp"));
        assert_eq!(args.num, Some(5));
        assert!(args.human_readable);
        assert!(args.no_recursive);
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_args_reject_negative_num() {
        assert!(Args::try_parse_from(["bigfiles", "-n", "-1"]).is_err());
    }

    #[test]
    fn test_lists_largest_first() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("big"), "xxxxx").unwrap();
        fs::write(temp.path().join("small"), "x").unwrap();

        let result = run_with(&[dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        let lines: Vec<&str> = result.out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "File Size\tPath");
        assert!(lines[1].starts_with("5\t") && lines[1].ends_with("big"));
        assert!(lines[2].starts_with("1\t") && lines[2].ends_with("small"));
        assert!(result.err.contains("Scanned 2 files total. Sorting..."));
    }

    #[test]
    fn test_file_as_root_exits_1() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "not a directory").unwrap();

        let result = run_with(&[file.to_str().unwrap()]);

        assert_eq!(result.code, 1);
        assert!(result.err.contains("not a directory"));
        assert!(result.err.contains("file.txt"));
        assert!(result.out.is_empty());
    }

    #[test]
    fn test_missing_root_exits_1() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");

        let result = run_with(&[missing.to_str().unwrap()]);

        assert_eq!(result.code, 1);
        assert!(result.err.contains("does not exist"));
    }

    #[cfg(unix)]
    #[test]
    fn test_root_below_a_file_exits_1_naming_the_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let root = file.join("sub");

        let result = run_with(&[root.to_str().unwrap()]);

        assert_eq!(result.code, 1);
        assert!(result.err.starts_with("Error: '"));
        assert!(result.err.contains("file.txt"));
        assert!(result.out.is_empty());
    }

    #[test]
    fn test_empty_dir_reports_no_files() {
        let temp = TempDir::new().unwrap();

        let result = run_with(&[dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        assert!(result.out.starts_with("No files found in '"));
        assert!(!result.out.contains("File Size"));
        assert!(!result.err.contains("Sorting"));
    }

    #[test]
    fn test_num_limits_output() {
        let temp = three_files();

        let result = run_with(&["-n", "1", dir_arg(&temp)]);

        let lines: Vec<&str> = result.out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[1].starts_with("3\t") && lines[1].ends_with("c.txt"));
    }

    #[test]
    fn test_num_zero_lists_nothing() {
        let temp = three_files();

        let result = run_with(&["-n", "0", dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        assert!(result.out.starts_with("No files found"));
    }

    #[test]
    fn test_human_readable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("kb"), vec![0u8; 1536]).unwrap();

        let result = run_with(&["-H", dir_arg(&temp)]);

        let lines: Vec<&str> = result.out.lines().collect();
        assert!(lines[1].starts_with("     1.5KB\t"));
    }

    #[test]
    fn test_no_recursive() {
        let temp = three_files();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/huge"), vec![0u8; 100]).unwrap();

        let recursive = run_with(&[dir_arg(&temp)]);
        let flat = run_with(&["--no-recursive", dir_arg(&temp)]);

        assert!(recursive.out.contains("huge"));
        assert!(!flat.out.contains("huge"));
        assert_eq!(flat.out.lines().count(), 4);
    }

    #[test]
    fn test_quiet_suppresses_progress() {
        let temp = three_files();

        let result = run_with(&["-q", dir_arg(&temp)]);

        assert!(result.err.is_empty());
        assert_eq!(result.out.lines().count(), 4);
    }

    #[test]
    fn test_output_file() {
        let temp = three_files();
        let dest = TempDir::new().unwrap();
        let dest_file = dest.path().join("sizes.txt");

        let result = run_with(&["-o", dest_file.to_str().unwrap(), dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        assert!(result.out.starts_with("Results saved to '"));
        assert!(!result.out.contains("File Size"));

        let written = fs::read_to_string(&dest_file).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "File Size\tPath");
        assert_eq!(lines.len(), 4);
        assert!(lines[1].ends_with("c.txt"));
    }

    #[test]
    fn test_unopenable_output_file_is_not_fatal() {
        let temp = three_files();
        let dest = temp.path().join("no-such-dir").join("sizes.txt");

        let result = run_with(&["-o", dest.to_str().unwrap(), dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        assert!(result.err.contains("Could not open output file"));
        assert!(!result.out.contains("File Size"));
        assert!(!result.out.contains("Results saved"));
    }

    #[cfg(unix)]
    #[test]
    fn test_inaccessible_file_only_in_error_report() {
        use std::os::unix::fs::symlink;

        let temp = three_files();
        symlink(temp.path().join("vanished"), temp.path().join("broken")).unwrap();

        let result = run_with(&[dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        let (listing, report) = result.out.split_once("ERROR REPORT").unwrap();
        let listed: Vec<&str> = listing
            .lines()
            .skip(1)
            .take_while(|l| !l.is_empty())
            .collect();
        assert_eq!(listed.len(), 3);
        assert!(listed[0].ends_with("c.txt"));
        assert!(listed[2].ends_with("a.txt"));
        assert!(!listing.contains("broken"));
        assert!(report.contains("1 file(s) could not be accessed"));
        assert!(report.contains("broken"));
    }

    #[cfg(unix)]
    #[test]
    fn test_access_errors_reported_when_nothing_listed() {
        use std::os::unix::fs::symlink;

        let temp = TempDir::new().unwrap();
        symlink(temp.path().join("vanished"), temp.path().join("broken")).unwrap();

        let result = run_with(&[dir_arg(&temp)]);

        assert_eq!(result.code, 0);
        assert!(result.out.starts_with("No files found"));
        assert!(result.out.contains("ERROR REPORT"));
    }
}
