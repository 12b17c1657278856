//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::APP_NAME;
use crate::services::CoordinatePolicy;

/// Theme display mode preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThemeMode {
    /// Automatically detect OS theme (dark/light)
    #[default]
    Auto,
    /// Always use dark theme
    Dark,
    /// Always use light theme
    Light,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathConfig {
    /// Directory holding `maps.json`, `maps/` and `images/`
    pub data_dir: PathBuf,
    /// JSON file backing the favorites storage
    pub storage_file: PathBuf,
    /// Directory print snapshots are written to
    pub snapshot_dir: PathBuf,
}

impl Default for PathConfig {
    fn default() -> Self {
        let base = Config::config_dir().unwrap_or_else(|_| PathBuf::from(".hallmap"));
        Self {
            data_dir: PathBuf::from("data"),
            storage_file: base.join("storage.json"),
            snapshot_dir: base.join("snapshots"),
        }
    }
}

/// Viewer behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Page address that share links are built on
    pub share_base_url: String,
    /// What to do with booths whose coordinate lists are malformed
    #[serde(default)]
    pub coordinate_policy: CoordinatePolicy,
    /// Delay before the map is revalidated after printing, in milliseconds
    #[serde(default = "default_print_revalidate_ms")]
    pub print_revalidate_ms: u64,
}

const fn default_print_revalidate_ms() -> u64 {
    100
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            share_base_url: "https://halls.example.org/".to_string(),
            coordinate_policy: CoordinatePolicy::default(),
            print_revalidate_ms: default_print_revalidate_ms(),
        }
    }
}

/// UI preferences configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Display help on startup
    pub show_help_on_startup: bool,
    /// Theme mode preference (Auto, Dark, Light)
    #[serde(default)]
    pub theme_mode: ThemeMode,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_help_on_startup: true,
            theme_mode: ThemeMode::default(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/HallMap/config.toml`
/// - macOS: `~/Library/Application Support/HallMap/config.toml`
/// - Windows: `%APPDATA%\HallMap\config.toml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Viewer behavior
    #[serde(default)]
    pub viewer: ViewerConfig,
    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if the config file exists on disk.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the platform-specific config directory path.
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from `path`, defaulting when it is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to `path` via temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        fs::rename(&temp_path, path).context(format!(
            "Failed to rename temp config file to: {}",
            path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `share_base_url` is an http(s) address without a fragment
    /// - `print_revalidate_ms` is at most ten seconds
    pub fn validate(&self) -> Result<()> {
        let url = &self.viewer.share_base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("share_base_url must start with http:// or https://, got {url:?}");
        }
        if url.contains('#') {
            anyhow::bail!("share_base_url must not contain a fragment, got {url:?}");
        }
        if self.viewer.print_revalidate_ms > 10_000 {
            anyhow::bail!(
                "print_revalidate_ms must be at most 10000, got {}",
                self.viewer.print_revalidate_ms
            );
        }
        Ok(())
    }

    /// Log file used while the terminal UI owns the screen.
    pub fn log_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("hallmap.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.data_dir, PathBuf::from("data"));
        assert!(config.ui.show_help_on_startup);
        assert_eq!(config.ui.theme_mode, ThemeMode::Auto);
        assert_eq!(config.viewer.coordinate_policy, CoordinatePolicy::Skip);
        assert_eq!(config.viewer.print_revalidate_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validate_share_url() {
        let mut config = Config::new();
        config.viewer.share_base_url = "halls.example.org".to_string();
        assert!(config.validate().is_err());

        config.viewer.share_base_url = "https://halls.example.org/#x".to_string();
        assert!(config.validate().is_err());

        config.viewer.share_base_url = "http://localhost:8080/plan".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("sub").join("config.toml");

        let mut config = Config::new();
        config.paths.data_dir = temp_dir.path().join("halls");
        config.viewer.coordinate_policy = CoordinatePolicy::Fail;
        config.ui.theme_mode = ThemeMode::Light;
        config.save_to(&config_file).unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
        assert!(!config_file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[viewer]\nshare_base_url = \"https://fair.example.com/\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.viewer.share_base_url, "https://fair.example.com/");
        assert_eq!(loaded.viewer.print_revalidate_ms, 100);
        assert_eq!(loaded.ui, UiConfig::default());
    }

    #[test]
    fn test_config_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("none.toml")).unwrap();
        assert_eq!(loaded, Config::new());
    }
}
