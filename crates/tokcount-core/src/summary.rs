//! Scan summary aggregation
//!
//! The summary is never mutated in place: it is always recomputed from the
//! ordered record list so totals cannot drift from the records.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::record::{FileRecord, FileStatus, serialize_millis, serialize_path};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub total_tokens: u64,
    pub total_bytes: u64,
    /// Wall-clock time of the whole walk, not the sum of per-file times
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

impl ScanSummary {
    /// Fold an ordered record list into totals
    pub fn from_records(records: &[FileRecord], elapsed: Duration) -> Self {
        let mut summary = records.iter().fold(Self::default(), |mut acc, record| {
            match record.status {
                FileStatus::Counted { tokens, .. } => {
                    acc.files_processed += 1;
                    acc.total_tokens += tokens;
                }
                FileStatus::Skipped { .. } => acc.files_skipped += 1,
                FileStatus::Failed { .. } => acc.files_failed += 1,
            }
            acc.total_bytes += record.byte_size;
            acc
        });
        summary.elapsed = elapsed;
        summary
    }

    /// Number of records the summary was built from
    pub fn total_files(&self) -> u64 {
        self.files_processed + self.files_skipped + self.files_failed
    }

    /// Mean tokens per counted file
    pub fn average_tokens(&self) -> Option<f64> {
        if self.files_processed == 0 {
            None
        } else {
            Some(self.total_tokens as f64 / self.files_processed as f64)
        }
    }
}

/// Terminal artifact of a directory scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    #[serde(serialize_with = "serialize_path")]
    pub root: PathBuf,
    pub records: Vec<FileRecord>,
    pub summary: ScanSummary,
    /// Set when the walk was interrupted; `records` then holds only the
    /// files that finished, still in traversal order.
    pub cancelled: bool,
}

impl ScanReport {
    pub fn new(
        root: impl Into<PathBuf>,
        records: Vec<FileRecord>,
        elapsed: Duration,
        cancelled: bool,
    ) -> Self {
        let summary = ScanSummary::from_records(&records, elapsed);
        Self {
            root: root.into(),
            records,
            summary,
            cancelled,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileRecord> {
        self.records
            .iter()
            .filter(|r| matches!(r.status, FileStatus::Failed { .. }))
    }
}
