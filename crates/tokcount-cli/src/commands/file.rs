use anyhow::{Result, bail};
use std::process::ExitCode;
use tokcount_config::Config;
use tokcount_core::{FileStatus, render_file};
use tokcount_sources::FileCounter;
use tokcount_tokens::Tokenizer;

use super::load_tokenizer;
use crate::cli::FileArgs;

pub async fn handle(args: FileArgs, config: &Config) -> Result<ExitCode> {
    let encoding = args.encoding.as_deref().unwrap_or(&config.encoding);
    let tokenizer = load_tokenizer(encoding)?;
    let counter = FileCounter::new(tokenizer.clone());

    let path = args.path.clone();
    let record = tokio::task::spawn_blocking(move || counter.count_file(&path)).await?;

    match &record.status {
        FileStatus::Counted { tokens, .. } => {
            if args.quiet {
                println!("{}", tokens);
            } else {
                print!("{}", render_file(&record, tokenizer.name(), args.stats));
            }
            Ok(ExitCode::SUCCESS)
        }
        FileStatus::Skipped { reason } => bail!(
            "{} is {}; only UTF-8 text files can be counted",
            args.path.display(),
            reason
        ),
        FileStatus::Failed { error } => bail!("Cannot count {}: {}", args.path.display(), error),
    }
}
