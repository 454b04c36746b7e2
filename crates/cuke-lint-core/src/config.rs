//! Configuration types for cuke-lint.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration, loaded from `cuke-lint.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Tag validation configuration.
    #[serde(default)]
    pub tags: TagsConfig,

    /// File discovery configuration.
    #[serde(default)]
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// The effective tag allow-list: the configured override, or the
    /// built-in list.
    #[must_use]
    pub fn allowed_tags(&self) -> Vec<String> {
        self.tags.allowed.clone().unwrap_or_else(|| {
            crate::engine::DEFAULT_ALLOWED_TAGS
                .iter()
                .map(ToString::to_string)
                .collect()
        })
    }
}

/// Tag validation configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagsConfig {
    /// Replacement for the built-in allow-list of control tags.
    #[serde(default)]
    pub allowed: Option<Vec<String>>,
}

/// File discovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    /// Glob patterns to exclude from discovery.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Whether to respect .gitignore files when walking directories.
    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            exclude: Vec::new(),
            respect_gitignore: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
