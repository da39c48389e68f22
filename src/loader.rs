use crate::parser::{self, LogRecord, ParseError};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// A line that produced no record, kept for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number in the source file
    pub line_number: usize,
    pub reason: ParseError,
}

/// Parsed contents of one log file
#[derive(Debug, Default)]
pub struct LoadedLogs {
    /// Well-formed records in source order
    pub records: Vec<LogRecord>,
    /// Malformed lines in source order
    pub skipped: Vec<SkippedLine>,
}

impl LoadedLogs {
    /// Number of lines read, well-formed or not
    pub fn total_lines(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    /// Skipped lines worth a warning; blank lines are passed over silently
    pub fn malformed(&self) -> impl Iterator<Item = &SkippedLine> {
        self.skipped.iter().filter(|s| s.reason != ParseError::Blank)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read the whole file at `path` and parse every line.
///
/// Missing files, permission problems and invalid UTF-8 all surface as
/// `LoadError::Read`. Malformed lines never fail the load; they are
/// collected in `LoadedLogs::skipped`.
pub fn load_logs(path: &Path) -> Result<LoadedLogs, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(load_str(&text))
}

/// `\r\n`, `\n` and a lone `\r` all end a line
static LINE_BREAK: OnceLock<Regex> = OnceLock::new();

fn split_lines(text: &str) -> Vec<&str> {
    let re = LINE_BREAK.get_or_init(|| {
        Regex::new(r"\r\n|\r|\n").expect("hard-coded regex should always compile")
    });

    let mut lines: Vec<&str> = re.split(text).collect();
    // A terminator at the very end does not open another line
    if lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Parse already-loaded log text, one record per line.
pub fn load_str(text: &str) -> LoadedLogs {
    let mut logs = LoadedLogs::default();

    for (idx, line) in split_lines(text).into_iter().enumerate() {
        match parser::parse_line(line) {
            Ok(record) => logs.records.push(record),
            Err(reason) => logs.skipped.push(SkippedLine {
                line_number: idx + 1,
                reason,
            }),
        }
    }

    logs
}
