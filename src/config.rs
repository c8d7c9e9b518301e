//! Configuration management with TOML, environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// GitHub repository holding the tracked issues, `owner/name`
    #[serde(default = "default_repo")]
    pub repo: String,

    /// URL of the price evaluation page
    #[serde(default = "default_source_url")]
    pub source_url: String,

    /// GitHub API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// GitHub access token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Local HTML file to use instead of fetching the page
    #[serde(default)]
    pub local_path: Option<PathBuf>,
}

fn default_repo() -> String {
    "ronhuang/coolpc-alert".to_string()
}

fn default_source_url() -> String {
    "http://www.coolpc.com.tw/evaluate.php".to_string()
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            repo: default_repo(),
            source_url: default_source_url(),
            api_url: default_api_url(),
            token: None,
            local_path: None,
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("coolpc-watch").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(repo) = std::env::var("GITHUB_REPOSITORY") {
            if !repo.is_empty() {
                self.repo = repo;
            }
        }

        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                self.token = Some(token);
            }
        }

        if let Ok(url) = std::env::var("COOLPC_URL") {
            if !url.is_empty() {
                self.source_url = url;
            }
        }

        self
    }
}
