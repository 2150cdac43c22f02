use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fugit_cli::commands::report;
use fugit_cli::{Cli, Config, FILE_ENV};

/// Resolves the log path: `--file` wins over configuration.
fn log_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(file) = &cli.file {
        return Ok(file.clone());
    }

    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    config
        .file
        .with_context(|| format!("no log file configured; set {FILE_ENV} or pass --file"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let file = log_path(&cli)?;
    let window = cli.range.period().window(Utc::now());

    let stdout = std::io::stdout();
    report::run(
        &mut stdout.lock(),
        &file,
        window,
        cli.tag.as_ref(),
        cli.json,
    )
}
