use serde::Serialize;
use std::io;
use thiserror::Error;

/// Why a single file could not be counted.
///
/// Recovered per file: it ends up inside a `FileStatus::Failed` record and
/// never aborts a scan.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[error("{kind}: {message}")]
pub struct FileError {
    pub kind: FileErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileErrorKind {
    PermissionDenied,
    NotFound,
    NotAFile,
    Io,
}

impl std::fmt::Display for FileErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FileErrorKind::PermissionDenied => "permission denied",
            FileErrorKind::NotFound => "not found",
            FileErrorKind::NotAFile => "not a file",
            FileErrorKind::Io => "io error",
        };
        f.write_str(label)
    }
}

impl FileError {
    pub fn new(kind: FileErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_a_file() -> Self {
        Self::new(FileErrorKind::NotAFile, "not a regular file")
    }
}

impl From<io::Error> for FileError {
    fn from(err: io::Error) -> Self {
        let kind = match err.kind() {
            io::ErrorKind::PermissionDenied => FileErrorKind::PermissionDenied,
            io::ErrorKind::NotFound => FileErrorKind::NotFound,
            io::ErrorKind::IsADirectory => FileErrorKind::NotAFile,
            _ => FileErrorKind::Io,
        };
        Self::new(kind, err.to_string())
    }
}

/// A glob pattern in the scan filter could not be compiled.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterConfigError {
    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_mapping() {
        let denied: FileError = io::Error::from(io::ErrorKind::PermissionDenied).into();
        assert_eq!(denied.kind, FileErrorKind::PermissionDenied);

        let missing: FileError = io::Error::from(io::ErrorKind::NotFound).into();
        assert_eq!(missing.kind, FileErrorKind::NotFound);

        let other: FileError = io::Error::other("disk on fire").into();
        assert_eq!(other.kind, FileErrorKind::Io);
        assert!(other.to_string().contains("disk on fire"));
    }
}
