mod analyzer;
mod loader;
mod logging;
mod parser;
mod report;

use clap::Parser;
use colored::Colorize;
use std::io::{self, Write};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};

/// A small CLI tool for tallying log lines by severity level
#[derive(Parser, Debug)]
#[command(
    name = "log_level_stats",
    author,
    version,
    about = "Counts log entries per level and lists the entries of one level"
)]
struct Args {
    /// Path to the log file to analyze
    #[arg(value_name = "FILE_PATH")]
    file_path: PathBuf,

    /// Level whose entries should be listed (case-insensitive)
    #[arg(value_name = "LOG_LEVEL")]
    log_level: Option<String>,

    /// Export results as JSON to the specified file path
    #[arg(short = 'j', long = "json-output", value_name = "OUTPUT_FILE")]
    json_output: Option<PathBuf>,

    /// Suppress warnings for malformed log lines
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Disable colored diagnostics
    #[arg(long = "no-color")]
    no_color: bool,
}

#[derive(Debug, Error)]
enum AppError {
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to write JSON output: {0}")]
    Export(#[from] report::ReportError),
}

fn main() {
    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }
    logging::init_logging(!args.no_color);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(&args, &mut out) {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// One pass of the pipeline: validate, load, count, report.
///
/// Missing files, unreadable files and files without a single well-formed
/// line all end the run early without an error.
fn run<W: Write>(args: &Args, out: &mut W) -> Result<(), AppError> {
    if !args.file_path.exists() {
        writeln!(out, "File '{}' does not exist", args.file_path.display())?;
        return Ok(());
    }

    let logs = match loader::load_logs(&args.file_path) {
        Ok(logs) => logs,
        Err(e) => {
            error!("{}", e);
            return Ok(());
        }
    };

    if !args.quiet {
        for skipped in logs.malformed() {
            warn!(line = skipped.line_number, "skipping malformed line: {}", skipped.reason);
        }
    }

    if logs.records.is_empty() {
        return Ok(());
    }

    // ── Level counts ─────────────────────────────────────────────────────────
    let counts = analyzer::count_by_level(&logs.records);
    report::display_counts(out, &counts)?;

    // ── Optional detail section ──────────────────────────────────────────────
    let filter = match &args.log_level {
        Some(level) => {
            let level = level.to_uppercase();
            let matching = analyzer::filter_by_level(&logs.records, &level);
            report::display_details(out, &level, &matching)?;
            Some(report::FilterSummary {
                level,
                records: matching,
            })
        }
        None => None,
    };

    // ── JSON export ──────────────────────────────────────────────────────────
    if let Some(json_path) = &args.json_output {
        let summary = report::Summary {
            source: args.file_path.clone(),
            total_lines: logs.total_lines(),
            well_formed_lines: counts.total(),
            malformed_lines: logs.skipped.len(),
            level_counts: &counts,
            filter,
        };
        report::export_json(&summary, json_path)?;
    }

    Ok(())
}
