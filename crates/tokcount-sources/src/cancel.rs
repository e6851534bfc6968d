use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared stop flag for a running scan.
///
/// The walker polls it between directory entries and before each dispatch;
/// files already being counted are left to finish.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    stop: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    /// Ask the scan to stop. Idempotent.
    pub fn cancel(&self) {
        if !self.stop.swap(true, Ordering::AcqRel) {
            tracing::debug!("Scan cancellation requested");
        }
    }

    /// Trip this token when the process receives Ctrl-C.
    ///
    /// Must be called from within a tokio runtime. The watcher task ends
    /// with the runtime.
    pub fn cancel_on_ctrl_c(&self) {
        let token = self.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("Interrupt received, finishing in-flight files");
                token.cancel();
            }
        });
    }
}
