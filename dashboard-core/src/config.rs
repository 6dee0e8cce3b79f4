use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Backend used when neither the config file nor the environment names one.
pub const DEFAULT_API_BASE: &str = "https://ai-weather-forecast-zwyp.onrender.com";

pub const DEFAULT_CITY: &str = "New Delhi";

/// Environment variable that overrides the configured backend.
pub const API_BASE_ENV: &str = "WEATHER_DASH_API_BASE";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_base = "http://localhost:8000"
/// default_city = "Lisbon"
/// timeout_secs = 20
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without the `/api/weather` path.
    pub api_base: Option<String>,

    /// City searched when none is given.
    pub default_city: Option<String>,

    /// Request timeout. Unset means requests may wait indefinitely.
    pub timeout_secs: Option<u64>,

    /// Set from the environment at load time, never written back.
    #[serde(skip)]
    api_base_override: Option<String>,
}

impl Config {
    /// Effective backend base URL: environment, then file, then default.
    pub fn api_base(&self) -> &str {
        self.api_base_override
            .as_deref()
            .or(self.api_base.as_deref())
            .unwrap_or(DEFAULT_API_BASE)
    }

    /// Backend base URL as stored in the file, ignoring the environment.
    pub fn stored_api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or(DEFAULT_API_BASE)
    }

    /// Replace the stored settings with user-entered values.
    ///
    /// A blank city or timeout unsets the field. The environment override
    /// is left alone and stays out of the file.
    pub fn update(&mut self, api_base: &str, default_city: &str, timeout_secs: &str) -> Result<()> {
        let api_base = api_base.trim();
        Url::parse(api_base).map_err(|e| anyhow!("Invalid API base URL '{api_base}': {e}"))?;

        let timeout_secs = match timeout_secs.trim() {
            "" => None,
            t => Some(t.parse().with_context(|| format!("Invalid timeout '{t}'"))?),
        };

        self.api_base = Some(api_base.to_string());
        self.default_city = Some(default_city.trim().to_string()).filter(|c| !c.is_empty());
        self.timeout_secs = timeout_secs;
        Ok(())
    }

    pub fn default_city(&self) -> &str {
        self.default_city.as_deref().unwrap_or(DEFAULT_CITY)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Apply an environment-provided base URL. Blank values are ignored.
    pub fn with_api_base_override(mut self, value: Option<String>) -> Self {
        self.api_base_override = value.filter(|v| !v.trim().is_empty());
        self
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        let cfg = Self::load_from(&path)?;
        Ok(cfg.with_api_base_override(std::env::var(API_BASE_ENV).ok()))
    }

    /// Load config from an explicit path, defaulting when the file is absent.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-dash", "weather-dash")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
