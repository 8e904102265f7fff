use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::client::ClientConfig;

/// Location remembered as the default for commands that take no query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedLocation {
    pub title: String,
    pub woeid: i64,
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Used by `metaweather show` when no query is given.
    pub default_location: Option<SavedLocation>,

    /// Override for the service root, e.g. a local mock server.
    pub base_url: Option<String>,

    /// Override for the per-request timeout, in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    /// Remember `title`/`woeid` as the default location.
    pub fn set_default_location(&mut self, title: String, woeid: i64) {
        self.default_location = Some(SavedLocation { title, woeid });
    }

    /// Fold the stored overrides onto the client defaults.
    pub fn client_config(&self) -> ClientConfig {
        let mut cfg = ClientConfig::default();

        if let Some(base_url) = &self.base_url {
            cfg.base_url = base_url.clone();
        }
        if let Some(secs) = self.request_timeout_secs {
            cfg.request_timeout = Duration::from_secs(secs);
        }

        cfg
    }

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
        let dirs = ProjectDirs::from("dev", "metaweather", "metaweather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_has_no_default_location() {
        let cfg = Config::default();
        assert!(cfg.default_location.is_none());
    }

    #[test]
    fn client_config_without_overrides_uses_defaults() {
        let cfg = Config::default();
        let client_cfg = cfg.client_config();

        assert_eq!(client_cfg.base_url, "https://www.metaweather.com");
        assert_eq!(client_cfg.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn client_config_applies_overrides() {
        let cfg = Config {
            base_url: Some("http://localhost:9999".to_string()),
            request_timeout_secs: Some(5),
            ..Config::default()
        };

        let client_cfg = cfg.client_config();
        assert_eq!(client_cfg.base_url, "http://localhost:9999");
        assert_eq!(client_cfg.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn set_default_location_replaces_previous() {
        let mut cfg = Config::default();

        cfg.set_default_location("London".to_string(), 44418);
        cfg.set_default_location("Amsterdam".to_string(), 727232);

        let saved = cfg.default_location.expect("default location must exist");
        assert_eq!(saved.title, "Amsterdam");
        assert_eq!(saved.woeid, 727232);
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_default_location("London".to_string(), 44418);
        cfg.base_url = Some("http://localhost:9999".to_string());

        let serialized = toml::to_string_pretty(&cfg).expect("config serializes");
        let parsed: Config = toml::from_str(&serialized).expect("config parses back");

        let saved = parsed.default_location.expect("default location survives");
        assert_eq!(saved.woeid, 44418);
        assert_eq!(parsed.base_url.as_deref(), Some("http://localhost:9999"));
    }
}
