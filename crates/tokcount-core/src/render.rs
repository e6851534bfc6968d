//! Report rendering - text, CSV and JSON views of a scan
//!
//! Rendering is a pure function of the report: the same report always
//! renders to the same bytes (apart from timing columns).

use std::fmt::Write as _;
use std::io;
use std::path::Path;

use crate::error::Result;
use crate::record::{FileRecord, FileStatus};
use crate::summary::{ScanReport, ScanSummary};

pub const CSV_HEADER: [&str; 5] = ["path", "status", "tokens", "bytes", "elapsed_ms"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// One line per file followed by the summary
    Full,
    /// Summary fields only
    Quiet,
}

/// Render a scan report as human-readable text
pub fn render(report: &ScanReport, mode: RenderMode) -> String {
    match mode {
        RenderMode::Quiet => render_quiet(&report.summary),
        RenderMode::Full => {
            let mut out = String::new();
            for record in &report.records {
                let _ = writeln!(out, "{}", render_record_line(record));
            }
            if !report.records.is_empty() {
                out.push('\n');
            }
            out.push_str(&render_summary(report));
            out
        }
    }
}

fn render_quiet(summary: &ScanSummary) -> String {
    format!(
        "files_processed={}\nfiles_skipped={}\nfiles_failed={}\ntotal_tokens={}\ntotal_bytes={}\nelapsed_ms={}\n",
        summary.files_processed,
        summary.files_skipped,
        summary.files_failed,
        summary.total_tokens,
        summary.total_bytes,
        summary.elapsed.as_millis(),
    )
}

fn render_record_line(record: &FileRecord) -> String {
    let detail = match &record.status {
        FileStatus::Counted { tokens, .. } => format!("{} tokens", format_count(*tokens)),
        FileStatus::Skipped { reason } => reason.to_string(),
        FileStatus::Failed { error } => error.to_string(),
    };
    format!(
        "{:<8} {:>24}  {}",
        record.status.label(),
        detail,
        record.path.display()
    )
}

fn render_summary(report: &ScanReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    let _ = writeln!(out, "Summary: {}", report.root.display());
    let _ = writeln!(out, "  Files processed: {}", format_count(summary.files_processed));
    let _ = writeln!(out, "  Files skipped:   {}", format_count(summary.files_skipped));
    let _ = writeln!(out, "  Files failed:    {}", format_count(summary.files_failed));
    let _ = writeln!(out, "  Total tokens:    {}", format_count(summary.total_tokens));
    let _ = writeln!(out, "  Total size:      {}", format_size(summary.total_bytes));
    let _ = writeln!(out, "  Elapsed:         {:.2}s", summary.elapsed.as_secs_f64());
    if let Some(avg) = summary.average_tokens() {
        let _ = writeln!(out, "  Average tokens/file: {:.0}", avg);
    }
    if report.cancelled {
        let _ = writeln!(out, "  Scan interrupted: results are partial");
    }

    let mut failures = report.failures().peekable();
    if failures.peek().is_some() {
        let _ = writeln!(out, "\nErrors:");
        for record in failures {
            if let FileStatus::Failed { error } = &record.status {
                let _ = writeln!(out, "  {}: {}", record.path.display(), error.message);
            }
        }
    }

    out
}

/// Render the single-file view used by `tokcount file`
pub fn render_file(record: &FileRecord, encoding: &str, detailed: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "File: {}", record.path.display());

    match &record.status {
        FileStatus::Counted {
            tokens,
            chars,
            lines,
        } => {
            let _ = writeln!(out, "Token count: {} tokens", format_count(*tokens));
            if detailed {
                let ratio = if *chars == 0 {
                    0.0
                } else {
                    *tokens as f64 / *chars as f64
                };
                let _ = writeln!(out, "File size: {}", format_size(record.byte_size));
                let _ = writeln!(out, "Characters: {}", format_count(*chars));
                let _ = writeln!(out, "Lines: {}", format_count(*lines));
                let _ = writeln!(out, "Tokens/char ratio: {:.3}", ratio);
                let _ = writeln!(out, "Encoding: {}", encoding);
                let _ = writeln!(
                    out,
                    "Processing time: {:.3} seconds",
                    record.elapsed.as_secs_f64()
                );
            }
        }
        FileStatus::Skipped { reason } => {
            let _ = writeln!(out, "Skipped: {}", reason);
        }
        FileStatus::Failed { error } => {
            let _ = writeln!(out, "Failed: {}", error);
        }
    }

    out
}

/// Render the CSV report (`path,status,tokens,bytes,elapsed_ms`)
pub fn render_csv(report: &ScanReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    write_rows(&mut writer, report)?;
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Write the CSV report to a file
pub fn write_csv(report: &ScanReport, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    write_rows(&mut writer, report)?;
    writer.flush()?;
    Ok(())
}

fn write_rows<W: io::Write>(writer: &mut csv::Writer<W>, report: &ScanReport) -> Result<()> {
    writer.write_record(CSV_HEADER)?;
    for record in &report.records {
        let tokens = record
            .token_count()
            .map(|t| t.to_string())
            .unwrap_or_default();
        writer.write_record([
            &*record.path.to_string_lossy(),
            record.status.label(),
            tokens.as_str(),
            record.byte_size.to_string().as_str(),
            format!("{:.3}", record.elapsed.as_secs_f64() * 1000.0).as_str(),
        ])?;
    }
    Ok(())
}

/// Render the report as pretty-printed JSON
pub fn render_json(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Human-readable byte size (B, KB, MB, GB, TB) with one decimal
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{:.1} {}", size, unit);
        }
        size /= 1024.0;
    }
    format!("{:.1} TB", size)
}

/// Integer with thousands separators
fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
