mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tokcount_config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing; stdout is reserved for reports
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        Config::default()
    });

    match cli.command {
        cli::Commands::File(args) => commands::file::handle(args, &config).await,
        cli::Commands::Dir(args) => commands::dir::handle(args, &config).await,
    }
}
