// CLI argument definitions using Clap

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Report output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// SNBT quest pack tooling
#[derive(Parser, Debug)]
#[command(name = "questsnbt")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Format, check and inspect SNBT quest packs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose debug output
    #[arg(short = 'v', long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Use this configuration file instead of the default locations
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite quest files in canonical SNBT
    Fmt(FmtArgs),

    /// Validate quest files
    Check(CheckArgs),

    /// Preview the items of a loot table file
    Loot(LootArgs),

    /// Print an SNBT file as JSON
    Dump(DumpArgs),

    /// Show the effective configuration
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct FmtArgs {
    /// Files or directories to format
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Write changes to file instead of stdout
    #[arg(short = 'w', long, default_value_t = false)]
    pub write: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Files or directories to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only run structural checks on the raw SNBT
    #[arg(long, default_value_t = false)]
    pub schema_only: bool,
}

#[derive(Args, Debug, Clone)]
pub struct LootArgs {
    /// Loot table file
    pub file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(Args, Debug, Clone)]
pub struct DumpArgs {
    /// SNBT file to convert
    pub file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_check_with_global_flags() {
        let cli = Cli::try_parse_from([
            "questsnbt",
            "check",
            "quests/",
            "--format",
            "json",
            "--schema-only",
            "-v",
            "--config",
            "ci.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("ci.toml")));
        match cli.command {
            Commands::Check(args) => {
                assert_eq!(args.paths, vec![PathBuf::from("quests/")]);
                assert_eq!(args.format, OutputFormat::Json);
                assert!(args.schema_only);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn fmt_requires_a_path() {
        assert!(Cli::try_parse_from(["questsnbt", "fmt"]).is_err());
    }
}
