//! # Configuration Management
//!
//! Loads and saves the identity used in headers, the optional header width
//! and the auto-insert toggle.
//!
//! ## Configuration File Location
//!
//! All platforms: `$XDG_CONFIG_HOME/ftheader/config.json`, falling back to
//! `$HOME/.config/ftheader/config.json`.
//!
//! On Windows, uses `%USERPROFILE%\.config\ftheader\config.json` if `$HOME` is not set.
//!
//! ## Environment Overrides
//!
//! `FTHEADER_IDENTITY` and `FTHEADER_EMAIL` take precedence over the file.

use anyhow::{Context, Result};
use ftheader_core::HeaderSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the configured identity
pub const IDENTITY_ENV_VAR: &str = "FTHEADER_IDENTITY";

/// Environment variable overriding the configured email
pub const EMAIL_ENV_VAR: &str = "FTHEADER_EMAIL";

/// CLI and LSP configuration
///
/// # Example
///
/// ```rust
/// use ftheader::config::Config;
///
/// let config = Config::new("ada", "ada@example.com");
/// assert!(!config.auto_insert_on_create);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Login written into headers
    #[serde(default)]
    pub identity: String,
    /// Email written on the `By` line
    #[serde(default)]
    pub email: String,
    /// Total header width; the language default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_width: Option<i64>,
    /// Insert headers into files as soon as the editor creates them
    #[serde(default)]
    pub auto_insert_on_create: bool,
}

impl Config {
    pub fn new(identity: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            email: email.into(),
            ..Self::default()
        }
    }

    /// Effective identity: `FTHEADER_IDENTITY` when set, otherwise the stored value.
    pub fn identity(&self) -> String {
        std::env::var(IDENTITY_ENV_VAR).unwrap_or_else(|_| self.identity.clone())
    }

    /// Effective email: `FTHEADER_EMAIL` when set, otherwise the stored value.
    pub fn email(&self) -> String {
        std::env::var(EMAIL_ENV_VAR).unwrap_or_else(|_| self.email.clone())
    }

    /// Settings handed to the header engine, trimmed and with overrides applied.
    pub fn header_settings(&self) -> HeaderSettings {
        let settings = HeaderSettings::new(self.identity(), self.email());
        match self.header_width {
            Some(width) => settings.with_width(width),
            None => settings,
        }
    }

    /// Flip the auto-insert flag and return its new value.
    pub fn toggle_auto_insert(&mut self) -> bool {
        self.auto_insert_on_create = !self.auto_insert_on_create;
        self.auto_insert_on_create
    }

    /// Load the default config file, or an empty configuration when there is none.
    ///
    /// A file that exists but cannot be parsed is still an error.
    pub fn load_or_default() -> Result<Self> {
        let path = config_path()?;
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to the default config file
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// Get the path to the configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs_config_dir().context("Could not determine config directory")?;
    Ok(config_dir.join("ftheader").join("config.json"))
}

fn dirs_config_dir() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .or_else(|| std::env::var("USERPROFILE").ok())
                .map(|h| PathBuf::from(h).join(".config"))
        })
}
