//! Configuration management for Hexify.
//!
//! Handles loading configuration from TOML files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::plugin::PanelOptions;
use crate::tokens::{OutputFormat, RenderOptions, SortMode};

/// Name of the project-local config file.
pub const LOCAL_CONFIG_FILE: &str = ".hexify.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Export settings
    pub export: ExportConfig,

    /// UI panel settings
    pub panel: PanelOptions,
}

/// Export settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Default output format for `hexify export`
    pub format: OutputFormat,

    /// Variable ordering within a collection
    pub sort: SortMode,

    /// Wrap CSS output in a `:root` block
    pub wrap_root: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { format: OutputFormat::Scss, sort: SortMode::Source, wrap_root: true }
    }
}

impl ExportConfig {
    /// Renderer options derived from these settings.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions { sort: self.sort, wrap_root: self.wrap_root }
    }
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Looks for config in:
    /// 1. `.hexify.toml` in current directory
    /// 2. `~/.config/hexify/config.toml`
    /// 3. Falls back to defaults
    pub fn load() -> anyhow::Result<Self> {
        let local_config = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(config_dir) = Self::config_dir() {
            let global_config = config_dir.join("config.toml");
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Get the config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("hexify"))
    }
}
