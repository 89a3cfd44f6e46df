//! # sprout-config
//!
//! Layered configuration loading for sprout using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SPROUT_*` prefix, `__` as separator)
//! 2. Project-level `.sprout/config.toml`
//! 3. User-level `~/.config/sprout/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SPROUT_ANALYSIS__MAX_FUNCTION_LENGTH` -> `analysis.max_function_length`,
//! `SPROUT_GENERATION__SEED` -> `generation.seed`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use sprout_config::SproutConfig;
//!
//! let config = SproutConfig::load_with_dotenv().expect("config");
//! println!("max length: {}", config.analysis.max_function_length);
//! ```

mod error;
mod generation;

pub use error::ConfigError;
pub use generation::GenerationConfig;
pub use sprout_core::AnalysisRules;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file, relative to the working directory.
pub const PROJECT_CONFIG_PATH: &str = ".sprout/config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct SproutConfig {
    #[serde(default)]
    pub analysis: AnalysisRules,
    #[serde(default)]
    pub generation: GenerationConfig,
}

impl SproutConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    /// [`ConfigError::Figment`] when a source fails to parse or extract, and
    /// [`ConfigError::InvalidValue`] when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading a `.env` file from the current
    /// directory, if one exists.
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    /// Same as [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("SPROUT_").split("__"))
    }

    /// Reject values the analyzer and generator cannot work with.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.max_function_length == 0 {
            return Err(ConfigError::InvalidValue {
                field: "analysis.max_function_length".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.generation.default_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "generation.default_count".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sprout").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SproutConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.analysis.max_function_length, 50);
        assert!(config.analysis.check_docstrings);
        assert_eq!(config.generation.default_count, 3);
    }

    #[test]
    fn zero_count_is_rejected() {
        let mut config = SproutConfig::default();
        config.generation.default_count = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("generation.default_count"));
    }
}
