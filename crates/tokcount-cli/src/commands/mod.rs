pub mod dir;
pub mod file;

use anyhow::{Context, Result};
use std::sync::Arc;
use tokcount_tokens::{Encoding, TiktokenTokenizer};

/// Load the tokenizer once, before any file is touched
pub fn load_tokenizer(encoding: &str) -> Result<Arc<TiktokenTokenizer>> {
    let encoding: Encoding = encoding.parse()?;
    let tokenizer = TiktokenTokenizer::new(encoding)
        .with_context(|| format!("Cannot start without the {} tokenizer", encoding))?;
    Ok(Arc::new(tokenizer))
}
