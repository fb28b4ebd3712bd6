//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use crate::constants::{CONFIG_DIR_ENV, DEFAULT_OUTPUT_FILE, DEFAULT_PROFILE_NAME};
use crate::models::ProfileSettings;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Where the generated configuration is written
    /// (e.g., "`~/.config/karabiner/karabiner.json`")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    /// Rule file used instead of the built-in rules
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules_file: Option<PathBuf>,
}

/// Settings of the generated engine profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Profile name written to the output
    #[serde(default = "default_profile_name")]
    pub name: String,
    /// Show the engine icon in the menu bar
    #[serde(default = "default_show_in_menu_bar")]
    pub show_in_menu_bar: bool,
}

fn default_profile_name() -> String {
    DEFAULT_PROFILE_NAME.to_string()
}

const fn default_show_in_menu_bar() -> bool {
    true
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            name: default_profile_name(),
            show_in_menu_bar: default_show_in_menu_bar(),
        }
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Hyperlayer/config.toml`
/// - macOS: `~/Library/Application Support/Hyperlayer/config.toml`
/// - Windows: `%APPDATA%\Hyperlayer\config.toml`
///
/// `HYPERLAYER_CONFIG_DIR` replaces the directory when set.
///
/// # Validation
///
/// - `rules_file` must exist (if set) and be a `.toml`, `.json` or `.json5` file
/// - `output_file` must not be an existing directory
/// - profile name must be non-empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Generated profile settings
    #[serde(default)]
    pub profile: ProfileConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            paths: PathConfig::default(),
            profile: ProfileConfig::default(),
        }
    }

    /// Checks if the config file exists on disk.
    ///
    /// Returns true if config.toml exists, false otherwise.
    #[must_use]
    pub fn exists() -> bool {
        Self::config_file_path()
            .map(|path| path.exists())
            .unwrap_or(false)
    }

    /// Gets the config directory path.
    ///
    /// - Linux: `~/.config/Hyperlayer/`
    /// - macOS: `~/Library/Application Support/Hyperlayer/`
    /// - Windows: `%APPDATA%\Hyperlayer\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Hyperlayer");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration. A file that
    /// fails to parse or validate is an error.
    pub fn load() -> Result<Self> {
        let config = Self::load_unvalidated()?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration without validating it.
    ///
    /// Used by `config set`, which must be able to repair a config whose
    /// rule file no longer exists. Callers validate after applying changes.
    pub fn load_unvalidated() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(&config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        Ok(config)
    }

    /// Saves configuration to the config file using atomic write.
    ///
    /// Uses temp file + rename pattern for atomic writes.
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        // Ensure config directory exists
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir).context(format!(
            "Failed to create config directory: {}",
            config_dir.display()
        ))?;

        // Serialize to TOML
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let config_path = Self::config_file_path()?;
        let temp_path = config_path.with_extension("toml.tmp");

        // Write to temp file
        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, &config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - `rules_file` exists (if set) and has a supported extension
    /// - `output_file` is not a directory
    /// - profile name is non-empty
    pub fn validate(&self) -> Result<()> {
        if let Some(rules_file) = &self.paths.rules_file {
            if !rules_file.exists() {
                anyhow::bail!("Rule file does not exist: {}", rules_file.display());
            }
            crate::parser::RuleFormat::from_path(rules_file)?;
        }

        if let Some(output_file) = &self.paths.output_file {
            if output_file.is_dir() {
                anyhow::bail!(
                    "Output path is a directory, expected a file: {}",
                    output_file.display()
                );
            }
        }

        if self.profile.name.trim().is_empty() {
            anyhow::bail!("Profile name cannot be empty");
        }

        Ok(())
    }

    /// Sets the rule file with validation.
    pub fn set_rules_file(&mut self, path: PathBuf) -> Result<()> {
        self.paths.rules_file = Some(path);
        self.validate()
    }

    /// Sets the output file with validation.
    pub fn set_output_file(&mut self, path: PathBuf) -> Result<()> {
        self.paths.output_file = Some(path);
        self.validate()
    }

    /// Resolves the output path, falling back to `karabiner.json` in the
    /// working directory.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.paths
            .output_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE))
    }

    /// Profile settings for document generation.
    #[must_use]
    pub fn profile_settings(&self) -> ProfileSettings {
        ProfileSettings {
            name: self.profile.name.clone(),
            show_in_menu_bar: self.profile.show_in_menu_bar,
        }
    }
}
