use std::str::FromStr;
use std::sync::Arc;
use tiktoken_rs::CoreBPE;

use crate::{Tokenizer, TokenizerError};

/// BPE encodings bundled with tiktoken-rs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// GPT-4, GPT-3.5-turbo
    #[default]
    Cl100kBase,
    /// GPT-4o
    O200kBase,
    P50kBase,
    P50kEdit,
    R50kBase,
}

impl Encoding {
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    fn load(&self) -> Result<CoreBPE, TokenizerError> {
        let loaded = match self {
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::P50kEdit => tiktoken_rs::p50k_edit(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        };
        loaded.map_err(|e| TokenizerError::Load {
            encoding: self.name().to_string(),
            message: e.to_string(),
        })
    }
}

impl FromStr for Encoding {
    type Err = TokenizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cl100k_base" => Ok(Encoding::Cl100kBase),
            "o200k_base" => Ok(Encoding::O200kBase),
            "p50k_base" => Ok(Encoding::P50kBase),
            "p50k_edit" => Ok(Encoding::P50kEdit),
            "r50k_base" => Ok(Encoding::R50kBase),
            other => Err(TokenizerError::UnknownEncoding(other.to_string())),
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Token counter backed by a tiktoken BPE encoding.
///
/// `CoreBPE` encodes through `&self`, so one instance is shared by every
/// worker without a lock.
#[derive(Clone)]
pub struct TiktokenTokenizer {
    bpe: Arc<CoreBPE>,
    encoding: Encoding,
}

impl TiktokenTokenizer {
    /// Load the encoding's vocabulary. Done once per run.
    pub fn new(encoding: Encoding) -> Result<Self, TokenizerError> {
        let bpe = encoding.load()?;
        tracing::debug!("Loaded tokenizer encoding {}", encoding);
        Ok(Self {
            bpe: Arc::new(bpe),
            encoding,
        })
    }
}

impl Tokenizer for TiktokenTokenizer {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    fn name(&self) -> &str {
        self.encoding.name()
    }
}
