//! Command file handling

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use crate::command::Command;
use crate::errors::{CmdlineError, Result};

/// Syntax of a command file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    #[default]
    Yaml,
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from the file extension, falling back to YAML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => ConfigFormat::Toml,
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Yaml,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Top-level layout of a command file
#[derive(Debug, Clone, Deserialize)]
pub struct CommandFile {
    #[serde(default)]
    pub commands: Option<Vec<Command>>,
}

impl CommandFile {
    /// Read and parse a command file, choosing the syntax by extension
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<Command>> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| {
            CmdlineError::ConfigurationRead {
                path: path.to_path_buf(),
                source,
            }
        })?;

        debug!(path = %path.display(), bytes = content.len(), "Read command file");
        Self::parse(&content, ConfigFormat::from_path(path))
    }

    /// Parse command descriptors from an in-memory document
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Vec<Command>> {
        let file: CommandFile = match format {
            ConfigFormat::Yaml => serde_yaml::from_str::<CommandFile>(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str::<CommandFile>(content).map_err(|e| e.to_string()),
            ConfigFormat::Json => serde_json::from_str::<CommandFile>(content).map_err(|e| e.to_string()),
        }
        .map_err(|e| {
            CmdlineError::ConfigurationFormat(format!("Failed to parse {}: {}", format.as_str(), e))
        })?;

        file.commands.ok_or_else(|| {
            CmdlineError::ConfigurationFormat("missing top-level 'commands' key".to_string())
        })
    }
}

/// Default location of the command file, `<config dir>/cmdline/commands.yaml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("cmdline"))
        .unwrap_or_else(|| PathBuf::from(".cmdline"))
        .join("commands.yaml")
}
