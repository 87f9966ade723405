//! CI output channel
//!
//! Results are written as `key=value` lines. Appending to the file named by
//! `GITHUB_OUTPUT` is how GitHub Actions steps publish outputs; without a file
//! the line goes to stdout.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

/// Where computed values are published
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Append to a file (GitHub Actions `$GITHUB_OUTPUT`)
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// Pick the file target when a path is given, stdout otherwise
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(p) if !p.as_os_str().is_empty() => OutputTarget::File(p),
            _ => OutputTarget::Stdout,
        }
    }
}

/// Write one `key=value` line
pub fn write_output<W: Write>(writer: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(writer, "{}={}", key, value)
}

/// Publish `key=value` to the target
pub fn emit(target: &OutputTarget, key: &str, value: &str) -> Result<()> {
    match target {
        OutputTarget::File(path) => {
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            write_output(&mut file, key, value)?;
        }
        OutputTarget::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_output(&mut handle, key, value)?;
            handle.flush()?;
        }
    }
    tracing::debug!(key, value, ?target, "published output");
    Ok(())
}
