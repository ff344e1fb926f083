//! User-wide settings for jobhist.
//!
//! Settings live in a TOML file, by default `~/.jobhist/config.toml`
//! (`%LOCALAPPDATA%\jobhist\config.toml` on Windows). A missing file means
//! defaults; a file that exists but cannot be read or parsed is an error.
//!
//! ```toml
//! history_root = "/var/lib/tony/history"
//! metadata_file = "metadata.json"
//! config_file = "config.xml"
//! xml_nodes_limit = 1000000
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::core::JobhistError;
use crate::jobconf::XmlOptions;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV_VAR: &str = "JOBHIST_CONFIG";

fn default_history_root() -> PathBuf {
    PathBuf::from("history")
}

fn default_metadata_file() -> String {
    "metadata.json".to_string()
}

fn default_config_file() -> String {
    "config.xml".to_string()
}

const fn default_xml_nodes_limit() -> u32 {
    u32::MAX
}

/// Settings controlling where job documents are found and how they are parsed.
///
/// # Examples
///
/// ```rust
/// use jobhist_cli::config::HistoryConfig;
///
/// let config: HistoryConfig = toml::from_str("history_root = \"/data/history\"").unwrap();
/// assert_eq!(config.metadata_file, "metadata.json");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Directory holding one subdirectory per job
    #[serde(default = "default_history_root")]
    pub history_root: PathBuf,

    /// Name of the metadata document inside a job directory
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    /// Name of the configuration document inside a job directory
    #[serde(default = "default_config_file")]
    pub config_file: String,

    /// Node limit handed to the XML parser. Zero makes every configuration
    /// extraction fail with a parser-initialization error.
    #[serde(default = "default_xml_nodes_limit")]
    pub xml_nodes_limit: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            history_root: default_history_root(),
            metadata_file: default_metadata_file(),
            config_file: default_config_file(),
            xml_nodes_limit: default_xml_nodes_limit(),
        }
    }
}

impl HistoryConfig {
    /// Load settings from `path` if given, otherwise from `JOBHIST_CONFIG` or
    /// the default location. A missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => match std::env::var_os(CONFIG_ENV_VAR) {
                Some(env_path) => PathBuf::from(env_path),
                None => match Self::default_path() {
                    Ok(path) => path,
                    Err(e) => {
                        tracing::debug!("No default config location: {e}");
                        return Ok(Self::default());
                    }
                },
            },
        };

        if path.exists() {
            Self::load_from(&path).await
        } else {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The file contains invalid TOML or unknown keys
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| JobhistError::ConfigError {
            file: path.display().to_string(),
            reason: e.message().to_string(),
        })?;

        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Default settings file location.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("jobhist")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".jobhist")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Override the history root, e.g. from a `--root` flag.
    #[must_use]
    pub fn with_history_root(mut self, root: Option<PathBuf>) -> Self {
        if let Some(root) = root {
            self.history_root = root;
        }
        self
    }

    /// XML parser settings derived from this configuration.
    pub fn xml_options(&self) -> XmlOptions {
        XmlOptions {
            nodes_limit: self.xml_nodes_limit,
            ..XmlOptions::default()
        }
    }
}
