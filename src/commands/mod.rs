// Commands module - handles CLI command execution

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::error;

use crate::cli::Commands;
use crate::config::Config;

pub mod check;
pub mod dump;
pub mod fmt;
pub mod loot;

pub use check::handle_check;
pub use dump::handle_dump;
pub use fmt::handle_fmt;
pub use loot::handle_loot;

const SNBT_EXTENSION: &str = "snbt";

/// Run a subcommand. `Ok(false)` means the command completed but found problems.
pub fn run(command: &Commands, config: &Config) -> Result<bool> {
    match command {
        Commands::Fmt(args) => handle_fmt(args, config),
        Commands::Check(args) => handle_check(args, config),
        Commands::Loot(args) => handle_loot(args),
        Commands::Dump(args) => handle_dump(args),
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(true)
        }
    }
}

/// Expand files and directories into a sorted list of `.snbt` files.
/// Hidden entries below a directory root are skipped. Missing paths are
/// logged and returned separately.
pub fn collect_snbt_files(paths: &[PathBuf]) -> (Vec<PathBuf>, Vec<PathBuf>) {
    let mut files = Vec::new();
    let mut missing = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            files.extend(snbt_files_in(path));
        } else {
            error!("Path not found: {}", path.display());
            missing.push(path.clone());
        }
    }

    (files, missing)
}

fn snbt_files_in(dir: &Path) -> Vec<PathBuf> {
    let walker = walkdir::WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    walker
        .flatten()
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == SNBT_EXTENSION))
        .map(|e| e.into_path())
        .collect()
}
