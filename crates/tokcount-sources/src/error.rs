use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tokcount_core::FilterConfigError;

/// Walk-wide failures. Any of these aborts the scan before a report exists.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Directory not found: {}", .0.display())]
    RootNotFound(PathBuf),

    #[error("Path is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Cannot read directory {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Filter(#[from] FilterConfigError),

    #[error("Scan worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, ScanError>;
