// Main entry point for questsnbt

use anyhow::{Context, Result};
use clap::Parser;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

use quest_snbt_tools::cli::Cli;
use quest_snbt_tools::commands;
use quest_snbt_tools::config::Config;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup tracing; logs go to stderr so stdout stays clean for SNBT and JSON
    let filter = if cli.verbose {
        "quest_snbt_tools=debug,warn"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!("Starting questsnbt v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    let ok = commands::run(&cli.command, &config)?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
