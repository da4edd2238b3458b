//! Configuration management for Trendify CLI
//!
//! Stores API key, server URL and default user in ~/.config/trendify/config.toml.
//! `TRENDIFY_API_KEY` and `TRENDIFY_BASE_URL` override the file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_DIR: &str = "trendify";
const CONFIG_FILE: &str = "config.toml";

pub const ENV_API_KEY: &str = "TRENDIFY_API_KEY";
pub const ENV_BASE_URL: &str = "TRENDIFY_BASE_URL";

/// CLI Configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_user: Option<String>,
}

fn default_base_url() -> String {
    "https://trendify.shuttle.app".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            default_user: None,
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join(CONFIG_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load the config file only (no environment overrides)
    pub fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        Self::parse(&content)
    }

    /// Load config file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory {:?}", dir))?;

        let path = Self::config_path()?;
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Set API key
    pub fn set_api_key(&mut self, key: String) {
        self.api_key = Some(key);
    }

    /// User for history and saved generations: explicit, else default
    pub fn user(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(|s| s.to_string())
            .or_else(|| self.default_user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_defaults() {
        let config = Config::parse("api_key = \"k1\"\n").unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k1"));
        assert_eq!(config.base_url, default_base_url());
        assert!(config.default_user.is_none());
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut config =
            Config::parse("api_key = \"file-key\"\nbase_url = \"http://file\"\ndefault_user = \"ana\"\n")
                .unwrap();
        config.apply_overrides(|name| match name {
            ENV_API_KEY => Some("env-key".to_string()),
            ENV_BASE_URL => Some(String::new()),
            _ => None,
        });

        assert_eq!(config.api_key.as_deref(), Some("env-key"));
        // Empty values are ignored
        assert_eq!(config.base_url, "http://file");
        assert_eq!(config.user(None).as_deref(), Some("ana"));
        assert_eq!(config.user(Some("bia")).as_deref(), Some("bia"));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = Config {
            api_key: Some("k".into()),
            base_url: "http://localhost:8000".into(),
            default_user: None,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }
}
