// Configuration file handling

use crate::error::ConfigError;
use crate::validation::ValidationPipeline;
use crate::writer::WriterOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".questsnbt.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Spaces per nesting level in canonical output
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

impl FormatConfig {
    pub fn writer_options(&self) -> WriterOptions {
        WriterOptions {
            indent: self.indent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ValidationConfig {
    /// Validators to disable, by name
    #[serde(default)]
    pub skip: Vec<String>,

    /// Treat warnings as failures in `check`
    #[serde(default)]
    pub fail_on_warning: bool,
}

impl ValidationConfig {
    pub fn pipeline(&self) -> ValidationPipeline {
        ValidationPipeline::standard().without(&self.skip)
    }
}

fn default_indent() -> usize {
    2
}

impl Config {
    /// Load configuration from default locations, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        // 1. ./.questsnbt.toml
        // 2. ~/.questsnbt.toml
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            candidates.push(home.join(CONFIG_FILE_NAME));
        }

        for path in &candidates {
            if path.is_file() {
                return Self::load_from_file(path);
            }
        }
        debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading config");
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}
