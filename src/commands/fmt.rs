// Fmt command - rewrite quest files in canonical SNBT

use anyhow::Result;
use tracing::{debug, error, warn};

use super::collect_snbt_files;
use crate::cli::args::FmtArgs;
use crate::config::Config;
use crate::mapper;

pub fn handle_fmt(args: &FmtArgs, config: &Config) -> Result<bool> {
    let (files, missing) = collect_snbt_files(&args.paths);
    let mut has_error = !missing.is_empty();

    if files.is_empty() {
        if !has_error {
            warn!("No .snbt files found to format");
        }
        return Ok(!has_error);
    }

    let options = config.format.writer_options();

    for file in files {
        let original = match std::fs::read_to_string(&file) {
            Ok(text) => text,
            Err(e) => {
                error!("Failed to read {}: {}", file.display(), e);
                has_error = true;
                continue;
            }
        };

        let formatted = match mapper::format_with(&original, &options) {
            Ok(f) => f,
            Err(e) => {
                error!("Failed to format {}: {}", file.display(), e);
                has_error = true;
                continue;
            }
        };

        if args.write {
            if formatted.text == original {
                debug!("{} already canonical", file.display());
            } else if let Err(e) = std::fs::write(&file, &formatted.text) {
                error!("Failed to write {}: {}", file.display(), e);
                has_error = true;
            }
        } else {
            print!("{}", formatted.text);
        }
    }

    Ok(!has_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormatConfig;
    use std::fs;

    #[test]
    fn writes_canonical_text_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("pack.snbt");
        let bad = dir.path().join("broken.snbt");
        fs::write(&good, "{title:\"Pack\",id:\"pack\" # comment\n}").unwrap();
        fs::write(&bad, "{id: [").unwrap();

        let args = FmtArgs {
            paths: vec![dir.path().to_path_buf()],
            write: true,
        };
        let config = Config {
            format: FormatConfig { indent: 4 },
            ..Default::default()
        };
        assert!(!handle_fmt(&args, &config).unwrap());

        let written = fs::read_to_string(&good).unwrap();
        assert!(written.starts_with("{\n    id: \"pack\",\n    title: \"Pack\",\n"), "{written}");
        assert_eq!(fs::read_to_string(&bad).unwrap(), "{id: [");

        // second pass changes nothing
        fs::remove_file(&bad).unwrap();
        assert!(handle_fmt(&args, &config).unwrap());
        assert_eq!(fs::read_to_string(&good).unwrap(), written);
    }

    #[test]
    fn nothing_to_format_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let args = FmtArgs {
            paths: vec![dir.path().to_path_buf()],
            write: false,
        };
        assert!(handle_fmt(&args, &Config::default()).unwrap());
    }
}
