use crate::model::query::SortOrder;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://frontend-take-home-service.fetch.com";

/// Environment variable overriding `api_base_url`
pub const API_URL_ENV: &str = "SHELTER_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the shelter API, without a trailing slash
    pub api_base_url: String,
    /// Default tracing filter when `SHELTER_LOG` is unset
    pub log_level: String,
    /// Sort order used when the search screen first opens
    pub default_sort_order: SortOrder,
    /// Event poll interval
    pub tick_rate_ms: u64,
    /// Per-request timeout. Requests wait indefinitely when unset.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: "info".to_string(),
            default_sort_order: SortOrder::Asc,
            tick_rate_ms: 100,
            request_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn config_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".shelter-tui"))
    }

    fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }

    /// Load the config file, writing the defaults on first run.
    ///
    /// A malformed file is reported as an error and left untouched.
    pub fn load() -> anyhow::Result<Config> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        if !config_path.exists() {
            let config = Config::default();
            config.save()?;
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::parse(&contents)
            .map_err(|e| anyhow::anyhow!("Malformed config at {}: {}", config_path.display(), e))
    }

    /// Apply environment overrides on top of the loaded values
    pub fn with_env_overrides(mut self) -> Config {
        if let Ok(url) = env::var(API_URL_ENV) {
            self.apply_api_url_override(&url);
        }
        self
    }

    fn parse(contents: &str) -> serde_json::Result<Config> {
        serde_json::from_str(contents)
    }

    /// Save the config to disk
    pub fn save(&self) -> anyhow::Result<()> {
        let config_dir = Self::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config path"))?;

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    fn apply_api_url_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.api_base_url = url.to_string();
        }
    }

    /// Base URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
