use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Instructions sent to clients on initialize
pub const DEFAULT_INSTRUCTIONS: &str = "\
# Strands Agents MCP Server

This server provides tools to access Strands Agents documentation.
Strands Agents is a Python SDK for building AI agents.
It may also be referred to as simply 'Strands'.

The full documentation can be found at https://strandsagents.com.
";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_server_name")]
    pub name: String,

    #[serde(default = "default_instructions")]
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory holding the markdown documentation files
    #[serde(default = "default_content_dir")]
    pub dir: PathBuf,
}

fn default_server_name() -> String {
    crate::server::DEFAULT_SERVER_NAME.to_string()
}

fn default_instructions() -> String {
    DEFAULT_INSTRUCTIONS.to_string()
}

/// Content directory shipped with this crate
pub fn default_content_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/content"))
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            instructions: default_instructions(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: default_content_dir(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from `config_path`.
    ///
    /// A missing file means defaults unless `required` is set. A relative
    /// content directory is resolved against the file's directory.
    pub fn load(config_path: &Path, required: bool) -> Result<Self> {
        if !config_path.exists() {
            if required {
                bail!("Configuration file not found: {}", config_path.display());
            }
            tracing::debug!("Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)
            .context("Failed to read configuration file")?;
        let mut config: Self =
            toml::from_str(&content).context("Failed to parse configuration file")?;

        if config.content.dir.is_relative() {
            if let Some(base) = config_path.parent() {
                config.content.dir = base.join(&config.content.dir);
            }
        }

        Ok(config)
    }

    /// Replace the content directory, e.g. from the command line
    pub fn with_content_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.content.dir = dir;
        }
        self
    }
}
