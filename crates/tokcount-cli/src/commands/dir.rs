use anyhow::{Context, Result};
use std::process::ExitCode;
use tokcount_config::Config;
use tokcount_core::{
    RenderMode, ScanConfig, ScanFilter, default_concurrency, render, render_json, write_csv,
};
use tokcount_sources::{CancellationToken, parse_pattern_list, walk};

use super::load_tokenizer;
use crate::cli::DirArgs;

/// Exit status after Ctrl-C, matching shell convention for SIGINT
const EXIT_INTERRUPTED: u8 = 130;

pub async fn handle(args: DirArgs, config: &Config) -> Result<ExitCode> {
    let encoding = args.encoding.as_deref().unwrap_or(&config.encoding);
    let tokenizer = load_tokenizer(encoding)?;
    let scan_config = build_scan_config(&args, config);

    let cancel = CancellationToken::new();
    cancel.cancel_on_ctrl_c();

    let report = walk(&scan_config, tokenizer, &cancel)
        .await
        .with_context(|| format!("Failed to scan {}", scan_config.root.display()))?;

    if let Some(path) = &scan_config.report {
        write_csv(&report, path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        if !scan_config.quiet && !args.json {
            eprintln!("Report written to {}", path.display());
        }
    }

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        let mode = if scan_config.quiet {
            RenderMode::Quiet
        } else {
            RenderMode::Full
        };
        print!("{}", render(&report, mode));
    }

    if report.cancelled {
        Ok(ExitCode::from(EXIT_INTERRUPTED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Merge command-line flags over the config file into a scan configuration
fn build_scan_config(args: &DirArgs, config: &Config) -> ScanConfig {
    let include = args
        .filter
        .as_deref()
        .map(parse_pattern_list)
        .unwrap_or_default();

    let mut exclude = config.scan.exclude.clone();
    if let Some(list) = &args.exclude {
        exclude.extend(parse_pattern_list(list));
    }

    let concurrency = args
        .max_workers
        .or(config.max_workers)
        .unwrap_or_else(default_concurrency);

    ScanConfig {
        root: args.path.clone(),
        filter: ScanFilter::new(include, exclude),
        concurrency: concurrency.max(1),
        quiet: args.quiet,
        report: args.report.clone(),
        prune_excluded_dirs: args.prune_dirs || config.scan.prune_excluded_dirs,
    }
}
