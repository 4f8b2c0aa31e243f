//! # tandem-config
//!
//! Layered configuration loading for Tandem using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TANDEM_*` prefix, `__` as separator)
//! 2. An explicit config file, or the project-level `.tandem/config.toml`
//! 3. User-level `~/.config/tandem/config.toml`
//! 4. Built-in defaults
//!
//! Command-line flags are merged on top by `tandem-cli`.
//!
//! # Environment Variable Mapping
//!
//! Figment maps `TANDEM_COMPARE__MODE` -> `compare.mode`,
//! `TANDEM_CAPTURE__WORKERS` -> `capture.workers`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use tandem_config::TandemConfig;
//!
//! let config = TandemConfig::load_with_dotenv(None).expect("config");
//! println!("mode: {}", config.compare.mode);
//! ```

mod capture;
mod compare;
mod error;

pub use capture::CaptureConfig;
pub use compare::CompareConfig;
pub use error::ConfigError;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".tandem/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TandemConfig {
    #[serde(default)]
    pub capture: CaptureConfig,
    #[serde(default)]
    pub compare: CompareConfig,
}

impl TandemConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when `config_file` does not exist, a source fails
    /// to parse, or the merged values are invalid.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::extract(Self::figment(config_file)?)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(config_file)
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` on extraction or validation failure.
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can merge additional providers (CLI flags) on top.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::FileNotFound` when an explicit `config_file`
    /// does not exist.
    pub fn figment(config_file: Option<&Path>) -> Result<Figment, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Explicit or project-local config
        match config_file {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    });
                }
                figment = figment.merge(Toml::file(path));
            }
            None => {
                let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
                if local_path.exists() {
                    figment = figment.merge(Toml::file(local_path));
                }
            }
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("TANDEM_").split("__"));

        Ok(figment)
    }

    /// Validate every section.
    ///
    /// # Errors
    ///
    /// Returns the first `ConfigError::InvalidValue` found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.capture.validate()?;
        self.compare.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tandem").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::enums::CompareMode;

    #[test]
    fn default_config_is_valid() {
        let config = TandemConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.compare.mode, CompareMode::FailFast);
        assert_eq!(config.capture.exclude, vec!["reports"]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = TandemConfig::figment(Some(Path::new("/definitely/not/here.toml")))
            .expect_err("missing file should fail");
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
    }
}
