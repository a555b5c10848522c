//! Configuration management for mictoggle.
//!
//! This module provides core configuration that doesn't depend on
//! platform-specific UI libraries.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::APP_NAME;

/// Which permission model to use when asking for the microphone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PermissionModel {
    /// Pick the platform's own model
    #[default]
    Auto,
    /// Always show a consent prompt before granting
    Prompting,
    /// Treat the microphone as granted without asking
    AlwaysGranted,
}

/// Core configuration structure for the application.
///
/// Platform-specific settings like hotkeys are stored as strings and parsed
/// by the main application.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Permission model override
    #[serde(default, skip_serializing_if = "is_auto")]
    pub permission_model: PermissionModel,

    /// Show a desktop notification after each toggle
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub show_confirmations: bool,

    /// Hotkey that activates the toggle (stored as string, parsed by app)
    /// Format: "modifier+modifier+key" e.g., "shift+super+KeyM"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<String>,
}

fn default_true() -> bool {
    true
}

fn is_true(v: &bool) -> bool {
    *v
}

fn is_auto(v: &PermissionModel) -> bool {
    *v == PermissionModel::Auto
}

impl Default for Config {
    fn default() -> Self {
        Self {
            permission_model: PermissionModel::Auto,
            show_confirmations: true,
            hotkey: None,
        }
    }
}

impl Config {
    pub fn permission_model(&self) -> PermissionModel {
        self.permission_model
    }

    pub fn show_confirmations(&self) -> bool {
        self.show_confirmations
    }

    /// Get the raw hotkey string, if one is configured
    pub fn hotkey_str(&self) -> Option<&str> {
        self.hotkey.as_deref()
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new ConfigManager with the default configuration directory.
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Ok(Self { config_path })
    }

    /// Creates a new ConfigManager with a specified configuration directory.
    pub fn with_config_dir<P: AsRef<std::path::Path>>(dir: P) -> Self {
        let config_path = dir.as_ref().join(format!("{}.toml", APP_NAME));
        Self { config_path }
    }

    /// Returns the default path to the configuration file.
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = config_dir().context("Failed to retrieve configuration directory")?;
        Ok(config_dir.join(APP_NAME).join(format!("{}.toml", APP_NAME)))
    }

    /// Loads the configuration from the config file or returns default.
    pub fn load(&self) -> Result<Config> {
        if !self.config_path.exists() {
            debug!(path = ?self.config_path, "No config file, using defaults");
            return Ok(Config::default());
        }

        let config_content = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file at {:?}", self.config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file at {:?}", self.config_path))?;

        Ok(config)
    }

    /// Saves the configuration to the config file.
    pub fn save(&self, config: &Config) -> Result<()> {
        let config_dir = self
            .config_path
            .parent()
            .with_context(|| format!("Failed to get parent directory of {:?}", self.config_path))?;

        fs::create_dir_all(config_dir)
            .with_context(|| format!("Failed to create config directory at {:?}", config_dir))?;

        let serialized =
            toml::to_string_pretty(&config).context("Failed to serialize configuration")?;

        fs::write(&self.config_path, serialized)
            .with_context(|| format!("Failed to write config file at {:?}", self.config_path))?;

        Ok(())
    }

    /// Returns the path to the configuration file.
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.permission_model(), PermissionModel::Auto);
        assert!(config.show_confirmations());
        assert!(config.hotkey_str().is_none());
    }

    #[test]
    fn test_default_config_serializes_empty() {
        let serialized = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(serialized.trim().is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config {
            permission_model: PermissionModel::AlwaysGranted,
            show_confirmations: false,
            hotkey: Some("shift+alt+KeyQ".to_string()),
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        assert!(serialized.contains("permission_model = \"always-granted\""));

        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.permission_model, PermissionModel::AlwaysGranted);
        assert!(!deserialized.show_confirmations);
        assert_eq!(deserialized.hotkey_str(), Some("shift+alt+KeyQ"));
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("permission_model = \"prompting\"").unwrap();
        assert_eq!(config.permission_model, PermissionModel::Prompting);
        assert!(config.show_confirmations);
    }

    #[test]
    fn test_invalid_permission_model() {
        assert!(toml::from_str::<Config>("permission_model = \"sometimes\"").is_err());
    }

    #[test]
    fn test_config_manager_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.permission_model, PermissionModel::Auto);
    }

    #[test]
    fn test_config_manager_save_load() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path().join("nested"));

        let config = Config {
            permission_model: PermissionModel::Prompting,
            ..Default::default()
        };

        manager.save(&config).unwrap();
        assert!(manager.config_path().exists());

        let loaded = manager.load().unwrap();
        assert_eq!(loaded.permission_model, PermissionModel::Prompting);
        assert!(loaded.show_confirmations);
    }

    #[test]
    fn test_config_manager_rejects_garbage() {
        let temp_dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_config_dir(temp_dir.path());
        fs::write(manager.config_path(), "show_confirmations = maybe").unwrap();

        assert!(manager.load().is_err());
    }
}
