use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";

/// Cities offered as quick-select shortcuts.
pub const DEFAULT_EXAMPLE_CITIES: [&str; 5] = ["New York", "London", "Mumbai", "Tokyo", "São Paulo"];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// geocoding_url = "https://geocoding-api.open-meteo.com"
/// forecast_url = "https://api.open-meteo.com"
/// timeout_secs = 10
/// example_cities = ["Oslo", "Lima"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the geocoding host; `/v1/search` is appended.
    pub geocoding_url: String,

    /// Base URL of the forecast host; `/v1/forecast` is appended.
    pub forecast_url: String,

    /// Per-request timeout. No timeout when absent.
    pub timeout_secs: Option<u64>,

    pub example_cities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: None,
            example_cities: DEFAULT_EXAMPLE_CITIES.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.filter(|s| *s > 0).map(Duration::from_secs)
    }

    /// Load config from the platform config directory, or defaults on first run.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Load config from an explicit path, or return defaults if it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
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
        let dirs = ProjectDirs::from("dev", "weather-now", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
