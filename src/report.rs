use crate::analyzer::LevelCounts;
use crate::parser::LogRecord;
use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

const TABLE_HEADER: &str = "Logging Level | Count";
const TABLE_SEPARATOR: &str = "--------------|----------";
const LEVEL_WIDTH: usize = 16;

/// Records matching a requested level, as exported to JSON
#[derive(Debug, Serialize)]
pub struct FilterSummary<'a> {
    pub level: String,
    pub records: Vec<&'a LogRecord>,
}

/// Everything one run produced, as exported to JSON
#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub source: PathBuf,
    pub total_lines: usize,
    pub well_formed_lines: usize,
    pub malformed_lines: usize,
    pub level_counts: &'a LevelCounts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<FilterSummary<'a>>,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Write the level/count table, one row per level in mapping order.
pub fn display_counts<W: Write>(out: &mut W, counts: &LevelCounts) -> io::Result<()> {
    writeln!(out, "{}", TABLE_HEADER)?;
    writeln!(out, "{}", TABLE_SEPARATOR)?;
    for (level, count) in counts.iter() {
        writeln!(out, "{:<width$} | {}", level, count, width = LEVEL_WIDTH)?;
    }
    Ok(())
}

/// Write the detail section for `level`: a header line, then
/// `date time - message` for every record.
pub fn display_details<W: Write>(
    out: &mut W,
    level: &str,
    records: &[&LogRecord],
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Details for level '{}':", level)?;
    for record in records {
        writeln!(out, "{} {} - {}", record.date, record.time, record.message)?;
    }
    Ok(())
}

/// Export the run summary as pretty JSON to the given path
pub fn export_json(summary: &Summary<'_>, path: &Path) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::count_by_level;

    fn make_record(level: &str, message: &str) -> LogRecord {
        LogRecord {
            date: "2024-01-01".to_string(),
            time: "10:00:00".to_string(),
            level: level.to_string(),
            message: message.to_string(),
        }
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn renders_count_table() {
        let records = vec![
            make_record("ERROR", "a"),
            make_record("INFO", "b"),
            make_record("INFO", "c"),
        ];
        let counts = count_by_level(&records);
        let text = render(|out| display_counts(out, &counts));
        assert_eq!(
            text,
            "Logging Level | Count\n\
             --------------|----------\n\
             ERROR            | 1\n\
             INFO             | 2\n"
        );
    }

    #[test]
    fn long_levels_are_not_truncated() {
        let records = vec![make_record("SUPER_LONG_LEVEL_NAME", "a")];
        let counts = count_by_level(&records);
        let text = render(|out| display_counts(out, &counts));
        assert!(text.ends_with("SUPER_LONG_LEVEL_NAME | 1\n"));
    }

    #[test]
    fn empty_counts_render_header_only() {
        let text = render(|out| display_counts(out, &LevelCounts::default()));
        assert_eq!(text, "Logging Level | Count\n--------------|----------\n");
    }

    #[test]
    fn renders_details() {
        let first = make_record("ERROR", "something broke");
        let second = LogRecord {
            time: "10:05:00".to_string(),
            ..make_record("ERROR", "again")
        };
        let text = render(|out| display_details(out, "ERROR", &[&first, &second]));
        assert_eq!(
            text,
            "\nDetails for level 'ERROR':\n\
             2024-01-01 10:00:00 - something broke\n\
             2024-01-01 10:05:00 - again\n"
        );
    }

    #[test]
    fn exports_json_summary() {
        let records = vec![make_record("ERROR", "boom"), make_record("INFO", "fine")];
        let counts = count_by_level(&records);
        let summary = Summary {
            source: PathBuf::from("app.log"),
            total_lines: 3,
            well_formed_lines: 2,
            malformed_lines: 1,
            level_counts: &counts,
            filter: Some(FilterSummary {
                level: "ERROR".to_string(),
                records: vec![&records[0]],
            }),
        };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        export_json(&summary, &path).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["total_lines"], 3);
        assert_eq!(value["well_formed_lines"], 2);
        assert_eq!(value["malformed_lines"], 1);
        assert_eq!(value["level_counts"]["ERROR"], 1);
        assert_eq!(value["level_counts"]["INFO"], 1);
        assert_eq!(value["filter"]["level"], "ERROR");
        assert_eq!(value["filter"]["records"][0]["message"], "boom");
    }

    #[test]
    fn export_to_missing_directory_fails() {
        let counts = LevelCounts::default();
        let summary = Summary {
            source: PathBuf::from("app.log"),
            total_lines: 0,
            well_formed_lines: 0,
            malformed_lines: 0,
            level_counts: &counts,
            filter: None,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");
        let err = export_json(&summary, &path).unwrap_err();
        assert!(matches!(err, ReportError::Write { .. }));
    }
}
