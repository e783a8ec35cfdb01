/*
[INPUT]:  YAML configuration file and environment overrides
[OUTPUT]: Parsed application configuration
[POS]:    Configuration layer - app setup
[UPDATE]: When adding new configuration options
*/

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use dispo_adapter::ClientConfig;

/// Environment variable overriding the configured base URL.
pub const BASE_URL_ENV: &str = "DISPO_BASE_URL";

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api/v1";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Top-level configuration for the dispo front-end
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Base URL of the disposition service, including the /api/v1 prefix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Directory holding the persisted session; defaults to ./.dispo-config
    #[serde(default)]
    pub session_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            session_dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config.apply_env())
    }

    /// Load from an explicit path, the default path when present, or fall
    /// back to defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Self::default_path();
                if default.exists() {
                    Self::from_file(&default)
                } else {
                    Ok(Self::default().apply_env())
                }
            }
        }
    }

    /// Default config file location: `<config dir>/dispo/config.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dispo")
            .join("config.yaml")
    }

    /// Environment overrides, applied after file values
    fn apply_env(mut self) -> Self {
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url;
            }
        }
        self
    }

    /// HTTP client settings derived from this config
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }

    /// Session directory, defaulting beside the working directory
    pub fn session_dir(&self) -> PathBuf {
        self.session_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(".dispo-config"))
    }
}
