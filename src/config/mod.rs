use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::export::ExportFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Transcript fetching settings
    pub fetch: FetchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory used when no explicit output path is given
    pub output_dir: PathBuf,

    /// Default export format
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Preferred transcript language code (auto when unset)
    pub language_code: Option<String>,

    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("data"),
            format: "json".to_string(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            language_code: None,
            request_timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults.
    ///
    /// Missing settings files are not an error; an unreadable or invalid one
    /// is logged and the defaults are used, so a broken config cannot block a
    /// run. Fields absent from the file keep their default values.
    pub async fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            tracing::debug!("No settings file found; using defaults");
            return Ok(Self::default());
        }

        let content = match fs_err::read_to_string(&config_path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read settings from {}: {}", config_path.display(), err);
                return Ok(Self::default());
            }
        };

        match serde_yaml::from_str(&content) {
            Ok(config) => {
                tracing::debug!("Loaded settings from {}", config_path.display());
                Ok(config)
            }
            Err(err) => {
                tracing::warn!("Failed to parse settings from {}: {}", config_path.display(), err);
                Ok(Self::default())
            }
        }
    }

    /// Get configuration file path
    fn config_path() -> Result<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("yt-transcript-scraper").join("config.yaml"))
    }

    /// Parse the configured default export format.
    pub fn default_format(&self) -> Result<ExportFormat> {
        self.output.format.parse().map_err(anyhow::Error::from)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch.request_timeout_secs)
    }

    /// Display current configuration
    pub fn display(&self) {
        println!("Current Configuration:");
        println!("  Output Directory: {}", self.output.output_dir.display());
        println!("  Default Format: {}", self.output.format);
        match &self.fetch.language_code {
            Some(lang) => println!("  Language: {}", lang),
            None => println!("  Language: auto"),
        }
        println!("  Request Timeout: {}s", self.fetch.request_timeout_secs);
    }
}
