//! Configuration for flavorctl.
//!
//! The configuration is stored in TOML format. Every field has a default, so
//! an empty file (or no file at the default location) is a valid
//! configuration.
//!
//! ```toml
//! log_level = "debug"
//! base_path = "spec.template.spec"
//! conflict_policy = "warn"
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use flavor_core::DEFAULT_BASE_PATH;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::Error;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "flavorctl.toml";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// What to do when the merger reports conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Fail the command.
    #[default]
    Reject,
    /// Log the conflicts and print the defaulted object anyway.
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `FLAVORCTL_LOG` is not set.
    pub log_level: String,

    /// Prefix of every reported conflict path.
    pub base_path: String,

    pub conflict_policy: ConflictPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            base_path: DEFAULT_BASE_PATH.to_string(),
            conflict_policy: ConflictPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read, or
    /// is not valid TOML for this structure.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use std::path::Path;
    /// use flavor_cli::config::AppConfig;
    ///
    /// match AppConfig::load(Path::new("./flavorctl.toml")) {
    ///     Ok(config) => println!("Conflict policy: {:?}", config.conflict_policy),
    ///     Err(e) => eprintln!("Failed to load config: {}", e),
    /// }
    /// ```
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the configuration for a command invocation.
    ///
    /// An explicitly requested file must exist. Without one, the default file
    /// in the current directory is used if present, and the built-in defaults
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when an explicit file is missing or any file
    /// that is read is invalid.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, Error> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let path = get_config_path(None);
                if path.exists() {
                    Self::load(&path)
                } else {
                    debug!("No configuration file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Saves the configuration to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration cannot be serialized or written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
            }
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }
}

/// The configuration file path: the given one, or the default name in the current directory.
pub fn get_config_path(config_file: Option<&Path>) -> PathBuf {
    config_file
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILENAME))
}
