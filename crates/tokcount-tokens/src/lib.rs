//! Token counting port
//!
//! The scan engine only needs "text in, token count out". This crate defines
//! that capability as the [`Tokenizer`] trait and provides the tiktoken-backed
//! implementation used by the CLI.

pub mod estimator;

pub use estimator::{Encoding, TiktokenTokenizer};

use thiserror::Error;

/// Text → token count capability.
///
/// Implementations are shared across scan workers, so they must be safe to
/// call concurrently.
pub trait Tokenizer: Send + Sync {
    /// Number of tokens `text` encodes to
    fn count(&self, text: &str) -> usize;

    /// Name of the underlying encoding, for reports
    fn name(&self) -> &str;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    #[error("Unknown encoding '{0}' (expected one of: cl100k_base, o200k_base, p50k_base, p50k_edit, r50k_base)")]
    UnknownEncoding(String),

    #[error("Failed to initialize tokenizer '{encoding}': {message}")]
    Load { encoding: String, message: String },
}
