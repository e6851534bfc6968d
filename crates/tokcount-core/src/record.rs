//! Per-file scan records and scan configuration

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::FileError;

/// Outcome of counting one file. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileRecord {
    #[serde(serialize_with = "serialize_path")]
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: FileStatus,
    pub byte_size: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Counted {
        tokens: u64,
        chars: u64,
        lines: u64,
    },
    Skipped {
        reason: SkipReason,
    },
    Failed {
        error: FileError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Binary by the probe heuristic, or not valid UTF-8 anywhere in the file.
    BinaryOrUndecodable,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::BinaryOrUndecodable => f.write_str("binary or undecodable"),
        }
    }
}

impl FileStatus {
    /// Short label used in text and CSV reports
    pub fn label(&self) -> &'static str {
        match self {
            FileStatus::Counted { .. } => "counted",
            FileStatus::Skipped { .. } => "skipped",
            FileStatus::Failed { .. } => "failed",
        }
    }
}

impl FileRecord {
    pub fn counted(path: PathBuf, tokens: u64, chars: u64, lines: u64, byte_size: u64) -> Self {
        Self {
            path,
            status: FileStatus::Counted {
                tokens,
                chars,
                lines,
            },
            byte_size,
            elapsed: Duration::ZERO,
        }
    }

    pub fn skipped(path: PathBuf, reason: SkipReason, byte_size: u64) -> Self {
        Self {
            path,
            status: FileStatus::Skipped { reason },
            byte_size,
            elapsed: Duration::ZERO,
        }
    }

    pub fn failed(path: PathBuf, error: FileError, byte_size: u64) -> Self {
        Self {
            path,
            status: FileStatus::Failed { error },
            byte_size,
            elapsed: Duration::ZERO,
        }
    }

    pub fn with_elapsed(mut self, elapsed: Duration) -> Self {
        self.elapsed = elapsed;
        self
    }

    /// Token count, present only for counted files
    pub fn token_count(&self) -> Option<u64> {
        match self.status {
            FileStatus::Counted { tokens, .. } => Some(tokens),
            _ => None,
        }
    }
}

/// Include/exclude glob patterns, matched against file base names.
///
/// An empty include list matches everything; an empty exclude list excludes
/// nothing. When both lists match a name, exclude wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanFilter {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl ScanFilter {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }
}

/// Everything a directory scan needs, assembled by the CLI layer
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    pub filter: ScanFilter,
    pub concurrency: usize,
    pub quiet: bool,
    /// Where to write the CSV report, if one was requested
    pub report: Option<PathBuf>,
    /// Skip descending into directories whose name matches an exclude pattern
    pub prune_excluded_dirs: bool,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            filter: ScanFilter::default(),
            concurrency: default_concurrency(),
            quiet: false,
            report: None,
            prune_excluded_dirs: false,
        }
    }

    pub fn with_filter(mut self, filter: ScanFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn generate_report(&self) -> bool {
        self.report.is_some()
    }
}

/// Number of available processing units, falling back to 1
pub fn default_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

pub(crate) fn serialize_path<S: Serializer>(path: &Path, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&path.to_string_lossy())
}

pub(crate) fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FileErrorKind;

    #[test]
    fn test_token_count_only_for_counted() {
        let counted = FileRecord::counted(PathBuf::from("a.py"), 10, 40, 2, 42);
        assert_eq!(counted.token_count(), Some(10));

        let skipped = FileRecord::skipped(
            PathBuf::from("b.bin"),
            SkipReason::BinaryOrUndecodable,
            100,
        );
        assert_eq!(skipped.token_count(), None);

        let failed = FileRecord::failed(
            PathBuf::from("c.py"),
            FileError::new(FileErrorKind::PermissionDenied, "denied"),
            0,
        );
        assert_eq!(failed.token_count(), None);
        assert_eq!(failed.status.label(), "failed");
    }

    #[test]
    fn test_record_json_shape() {
        let record = FileRecord::skipped(
            PathBuf::from("b.bin"),
            SkipReason::BinaryOrUndecodable,
            7,
        )
        .with_elapsed(Duration::from_millis(2));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["path"], "b.bin");
        assert_eq!(json["status"], "skipped");
        assert_eq!(json["reason"], "binary_or_undecodable");
        assert_eq!(json["byte_size"], 7);
        assert!((json["elapsed_ms"].as_f64().unwrap() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::new("/tmp/project");
        assert!(config.concurrency >= 1);
        assert!(config.filter.is_empty());
        assert!(!config.generate_report());
        assert!(!config.prune_excluded_dirs);

        let config = config.with_concurrency(0);
        assert_eq!(config.concurrency, 1);
    }
}
