//! Core domain models and logic for tokcount
//!
//! This crate contains:
//! - Domain models (FileRecord, ScanFilter, ScanConfig, ScanReport)
//! - Summary aggregation (pure fold over ordered records)
//! - Report rendering (text, CSV, JSON)

pub mod error;
pub mod record;
pub mod render;
pub mod summary;

pub use error::{FileError, FileErrorKind, FilterConfigError, ReportError, Result};
pub use record::{FileRecord, FileStatus, ScanConfig, ScanFilter, SkipReason, default_concurrency};
pub use render::{RenderMode, format_size, render, render_csv, render_file, render_json, write_csv};
pub use summary::{ScanReport, ScanSummary};
