use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConsiaError, Result};

/// Environment variable overriding `backend_url`
pub const BACKEND_URL_ENV: &str = "CONSIA_BACKEND_URL";

/// Environment variable pointing at an alternative config file
pub const CONFIG_PATH_ENV: &str = "CONSIA_CONFIG";

/// Global consia configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the analysis service
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Client-side limit for one analysis request; none waits on the transport
    #[serde(default)]
    pub backend_timeout_secs: Option<u64>,

    /// Timeout for downloading product pages
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Analyze pages outside the supported marketplaces too
    #[serde(default)]
    pub allow_any_site: bool,

    /// User-Agent sent when downloading product pages
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/124.0 Safari/537.36"
        .to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            backend_timeout_secs: None,
            fetch_timeout_secs: default_fetch_timeout(),
            allow_any_site: false,
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Load configuration from the config file (defaults when it is missing),
    /// then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)?
        } else {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            Self::default()
        };

        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                config.backend_url = url.trim().to_string();
            }
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Render as TOML, the way `consia config` shows it
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConsiaError::ConfigError(e.to_string()))
    }

    /// The backend URL must be an absolute http(s) address
    pub fn validate(&self) -> Result<()> {
        let url = url::Url::parse(&self.backend_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConsiaError::ConfigError(format!(
                "backend_url must use http or https, got {}",
                url.scheme()
            )));
        }
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports the CONSIA_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "consia")
            .ok_or_else(|| ConsiaError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
