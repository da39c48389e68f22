use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// A single well-formed log line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRecord {
    pub date: String,
    pub time: String,
    pub level: String,
    pub message: String,
}

/// Reasons a line produces no record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The line holds nothing but whitespace
    #[error("blank line")]
    Blank,
    /// Fewer than the four fields `date time level message`
    #[error("expected at least 4 fields, found {found}")]
    MissingFields { found: usize },
}

/// Expected log format:
///   DATE TIME LEVEL MESSAGE...
///
/// Example:
///   2024-01-01 10:00:00 ERROR something broke
///
/// Date, time and level are opaque tokens. The message is everything after
/// the level, trimmed, and may contain whitespace of its own.
static LOG_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_regex() -> &'static Regex {
    LOG_REGEX.get_or_init(|| {
        Regex::new(
            r"(?s)^\s*(?P<date>\S+)\s+(?P<time>\S+)\s+(?P<level>\S+)\s+(?P<message>.*\S)\s*$",
        )
        .expect("hard-coded regex should always compile")
    })
}

/// Parse a single raw line into a `LogRecord`.
///
/// Returns `Err(ParseError)` when the line has fewer than four
/// whitespace-separated fields. This is an expected outcome for malformed
/// input, not a fault.
pub fn parse_line(raw: &str) -> Result<LogRecord, ParseError> {
    let Some(caps) = get_regex().captures(raw) else {
        return Err(match raw.split_whitespace().count() {
            0 => ParseError::Blank,
            found => ParseError::MissingFields { found },
        });
    };

    Ok(LogRecord {
        date: caps["date"].to_string(),
        time: caps["time"].to_string(),
        level: caps["level"].to_string(),
        message: caps["message"].to_string(),
    })
}

// ─── Unit Tests ──────────────────────────────────────────────────────────────
