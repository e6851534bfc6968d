//! Directory walker - deterministic, concurrent scan of a tree
//!
//! The full candidate list is built first, in lexicographic order within
//! each directory. Files are then counted on a bounded pool of blocking
//! tasks and each result lands in the slot of its candidate index, so the
//! record order never depends on which worker finishes first.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use walkdir::WalkDir;

use tokcount_core::{FileRecord, ScanConfig, ScanReport};
use tokcount_tokens::Tokenizer;

use crate::cancel::CancellationToken;
use crate::counter::FileCounter;
use crate::error::{Result, ScanError};
use crate::filter::FilterEngine;

/// Scan `config.root` and count every candidate file.
///
/// Per-file problems become `Skipped`/`Failed` records. Only a bad root, a
/// malformed filter or a crashed worker fails the scan.
///
/// On cancellation no new files are dispatched, in-flight files finish, and
/// the report holds the completed records with `cancelled` set.
pub async fn walk(
    config: &ScanConfig,
    tokenizer: Arc<dyn Tokenizer>,
    cancel: &CancellationToken,
) -> Result<ScanReport> {
    let started = Instant::now();
    let filter = FilterEngine::new(&config.filter)?;
    if !config.filter.is_empty() {
        tracing::debug!(
            "Filter: include {:?}, exclude {:?}",
            config.filter.include,
            config.filter.exclude
        );
    }
    check_root(&config.root)?;

    let candidates = {
        let root = config.root.clone();
        let prune = config.prune_excluded_dirs;
        let cancel = cancel.clone();
        tokio::task::spawn_blocking(move || enumerate(&root, &filter, prune, &cancel))
            .await
            .map_err(|e| ScanError::Worker(e.to_string()))??
    };

    if cancel.is_cancelled() {
        tracing::info!("Scan cancelled during enumeration");
        return Ok(ScanReport::new(
            config.root.clone(),
            Vec::new(),
            started.elapsed(),
            true,
        ));
    }

    let total = candidates.len();
    let concurrency = config.concurrency.max(1);
    tracing::info!(
        "Scanning {} candidate files in {} with {} workers",
        total,
        config.root.display(),
        concurrency
    );

    let mut slots: Vec<Option<FileRecord>> = vec![None; total];
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let counter = FileCounter::new(tokenizer);
    let mut tasks = JoinSet::new();
    let mut dispatched = 0;

    for (index, path) in candidates.into_iter().enumerate() {
        if cancel.is_cancelled() {
            break;
        }
        let permit = semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| ScanError::Worker(e.to_string()))?;
        // Waiting for a permit can take a while; check again before dispatch.
        if cancel.is_cancelled() {
            break;
        }

        let counter = counter.clone();
        tasks.spawn_blocking(move || {
            let _permit = permit;
            (index, counter.count_file(&path))
        });
        dispatched += 1;
    }

    while let Some(joined) = tasks.join_next().await {
        let (index, record) = joined.map_err(|e| ScanError::Worker(e.to_string()))?;
        slots[index] = Some(record);
    }

    let cancelled = dispatched < total;
    if cancelled {
        tracing::warn!(
            "Scan cancelled after {} of {} files",
            dispatched,
            total
        );
    }

    let records: Vec<FileRecord> = slots.into_iter().flatten().collect();
    let report = ScanReport::new(config.root.clone(), records, started.elapsed(), cancelled);
    tracing::info!(
        "Scan finished: {} counted, {} skipped, {} failed, {} tokens",
        report.summary.files_processed,
        report.summary.files_skipped,
        report.summary.files_failed,
        report.summary.total_tokens
    );
    Ok(report)
}

/// Build the ordered candidate list for a scan.
///
/// Entries are visited depth-first, sorted by file name within each
/// directory. Symlinks are never descended; a symlink to a regular file is a
/// candidate and a dangling one is too (it will report as not found).
/// Special files (sockets, FIFOs, devices) are never candidates, whether
/// reached directly or through a symlink.
pub fn enumerate(
    root: &Path,
    filter: &FilterEngine,
    prune_excluded_dirs: bool,
    cancel: &CancellationToken,
) -> Result<Vec<PathBuf>> {
    let mut candidates = Vec::new();

    let entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(prune_excluded_dirs
                && entry.depth() > 0
                && entry.file_type().is_dir()
                && filter.is_dir_excluded(entry.path()))
        });

    for entry in entries {
        if cancel.is_cancelled() {
            break;
        }

        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(ScanError::RootUnreadable {
                    path: root.to_path_buf(),
                    source: e.into(),
                });
            }
            Err(e) => {
                tracing::warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if file_type.is_symlink() {
            // A link whose target can't be resolved stays a candidate and
            // reports its own error; only regular-file targets are opened.
            if let Ok(target) = std::fs::metadata(entry.path()) {
                if target.is_dir() {
                    tracing::debug!("Not following directory symlink {}", entry.path().display());
                    continue;
                }
                if !target.is_file() {
                    tracing::debug!("Skipping symlink to special file {}", entry.path().display());
                    continue;
                }
            }
        } else if !file_type.is_file() {
            continue;
        }

        if !filter.should_process(entry.path()) {
            if let Some(pattern) = filter.matching_exclude(entry.path()) {
                tracing::debug!("Excluded {} by {}", entry.path().display(), pattern);
            }
            continue;
        }

        candidates.push(entry.into_path());
    }

    Ok(candidates)
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::RootNotFound(root.to_path_buf()),
        _ => ScanError::RootUnreadable {
            path: root.to_path_buf(),
            source: e,
        },
    })?;

    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    std::fs::read_dir(root).map_err(|e| ScanError::RootUnreadable {
        path: root.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
