use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use tokcount_core::{FileError, FileRecord, SkipReason};
use tokcount_tokens::Tokenizer;

use crate::classify::{Classification, classify};

/// Counts tokens for one file, end to end.
///
/// Every outcome maps to a record; nothing here returns an error or panics,
/// which is what lets the walker keep going past a bad file.
#[derive(Clone)]
pub struct FileCounter {
    tokenizer: Arc<dyn Tokenizer>,
}

impl FileCounter {
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        Self { tokenizer }
    }

    pub fn count_file(&self, path: &Path) -> FileRecord {
        let start = Instant::now();
        let record = self.count_inner(path);
        tracing::debug!(
            path = %path.display(),
            status = record.status.label(),
            tokens = record.token_count(),
            "Counted file"
        );
        record.with_elapsed(start.elapsed())
    }

    fn count_inner(&self, path: &Path) -> FileRecord {
        let owned = path.to_path_buf();

        let metadata = match std::fs::metadata(path) {
            Ok(m) => m,
            Err(e) => return FileRecord::failed(owned, e.into(), 0),
        };
        // Opening a FIFO blocks until a writer appears
        if !metadata.is_file() {
            return FileRecord::failed(owned, FileError::not_a_file(), 0);
        }
        let byte_size = metadata.len();

        match classify(path) {
            Classification::Text => {}
            Classification::Binary => {
                return FileRecord::skipped(owned, SkipReason::BinaryOrUndecodable, byte_size);
            }
            Classification::Unreadable(e) => {
                return FileRecord::failed(owned, e.into(), byte_size);
            }
        }

        let bytes = match std::fs::read(path) {
            Ok(b) => b,
            Err(e) => return FileRecord::failed(owned, e.into(), byte_size),
        };

        // Invalid bytes past the probe window are treated the same as a
        // binary probe.
        let content = match String::from_utf8(bytes) {
            Ok(c) => c,
            Err(_) => {
                return FileRecord::skipped(owned, SkipReason::BinaryOrUndecodable, byte_size);
            }
        };

        let tokens = self.tokenizer.count(&content) as u64;
        let chars = content.chars().count() as u64;
        let lines = if content.is_empty() {
            0
        } else {
            content.matches('\n').count() as u64 + 1
        };

        FileRecord::counted(owned, tokens, chars, lines, byte_size)
    }
}
