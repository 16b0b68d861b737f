//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! Searched in order, first hit wins:
//! 1. An explicit `--config <file>` (must exist)
//! 2. `$STRAPI_CODEMODS_CONFIG` if set
//! 3. `$XDG_CONFIG_HOME/strapi-codemods/config.toml`
//! 4. `~/.strapi-codemods/config.toml`
//!
//! Missing config files are not an error; defaults are used.
//!
//! # Precedence
//!
//! CLI flags override config values; config values override defaults.
//!
//! # Example
//!
//! ```no_run
//! use strapi_codemods::core::config::Config;
//!
//! let config = Config::load(None).unwrap();
//! println!("Interactive: {}", config.interactive());
//! println!("Include untracked: {}", config.include_untracked());
//! ```

pub mod schema;

pub use schema::{GlobalConfig, HelperCommand, HelpersConfig, WorkingTreeConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "STRAPI_CODEMODS_CONFIG";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file '{}' does not exist", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read config file '{}': {source}", .path.display())]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{}': {message}", .path.display())]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

/// Loaded configuration.
///
/// Accessor methods apply defaults so callers never deal with `Option`s.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Parsed configuration
    pub global: GlobalConfig,
    /// Path to the config file (if one was loaded)
    path: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// `explicit` is the `--config` flag; when given, the file must exist.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read, parsed
    /// or validated.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::NotFound {
                        path: path.to_path_buf(),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Self::discover(),
        };

        let Some(path) = path else {
            log::debug!("no config file found, using defaults");
            return Ok(Config::default());
        };

        log::debug!("loading config from {}", path.display());
        let global = Self::read_config(&path)?;
        global.validate()?;

        Ok(Config {
            global,
            path: Some(path),
        })
    }

    /// Build a config from an already-parsed value (tests, embedding).
    pub fn from_global(global: GlobalConfig) -> Result<Config, ConfigError> {
        global.validate()?;
        Ok(Config { global, path: None })
    }

    /// Find the first existing config file in the standard locations.
    fn discover() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("strapi-codemods/config.toml");
            if path.is_file() {
                return Some(path);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let path = home.join(".strapi-codemods/config.toml");
            if path.is_file() {
                return Some(path);
            }
        }

        None
    }

    /// Read and parse a config file.
    fn read_config(path: &Path) -> Result<GlobalConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Path of the loaded config file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    // =========================================================================
    // Accessor methods with defaults
    // =========================================================================

    /// Check if interactive mode is enabled by default.
    ///
    /// Defaults to `true` if not configured.
    pub fn interactive(&self) -> bool {
        self.global.interactive.unwrap_or(true)
    }

    /// Check if untracked files count as uncommitted changes.
    ///
    /// Defaults to `true` if not configured.
    pub fn include_untracked(&self) -> bool {
        self.global
            .working_tree
            .as_ref()
            .and_then(|w| w.include_untracked)
            .unwrap_or(true)
    }

    /// Check if the working tree check is skipped by default.
    ///
    /// Defaults to `false` if not configured.
    pub fn skip_working_tree_check(&self) -> bool {
        self.global
            .working_tree
            .as_ref()
            .and_then(|w| w.skip_check)
            .unwrap_or(false)
    }

    /// Get the helper bindings (empty if none configured).
    pub fn helpers(&self) -> HelpersConfig {
        self.global.helpers.clone().unwrap_or_default()
    }
}
