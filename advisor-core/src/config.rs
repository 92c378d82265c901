use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

pub const WEATHER_API_KEY_VAR: &str = "WEATHER_API_KEY";
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Top-level configuration: API keys stored on disk, overridable through the
/// environment. Loaded once at startup and passed into the clients
/// explicitly; nothing reads the environment after that.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key.
    pub weather_api_key: Option<String>,

    /// Gemini API key.
    pub gemini_api_key: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Load the on-disk config, then let `WEATHER_API_KEY` / `GEMINI_API_KEY`
    /// take precedence over the stored values.
    pub fn from_env() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env(|name| env::var(name).ok());
        Ok(cfg)
    }

    fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(key) = get(WEATHER_API_KEY_VAR) {
            self.weather_api_key = Some(key);
        }
        if let Some(key) = get(GEMINI_API_KEY_VAR) {
            self.gemini_api_key = Some(key);
        }
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-advisor", "weather-advisor")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Key handed to the weather client. An unconfigured key goes out empty;
    /// the remote rejection then surfaces as a fetch failure.
    pub fn weather_key(&self) -> String {
        self.weather_api_key.clone().unwrap_or_default()
    }

    /// Key handed to the advice client; same empty-key behavior as above.
    pub fn gemini_key(&self) -> String {
        self.gemini_api_key.clone().unwrap_or_default()
    }
}
