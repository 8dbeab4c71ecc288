//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `LANGMODEL_*` environment variables.

pub mod error;

#[cfg(test)]
mod tests;

pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::adapter::AdapterOptions;
use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_CACHE_CAPACITY, DEFAULT_DATA_PATH, DEFAULT_LANGUAGE,
};

/// Pipeline-wide settings shared by every component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Language code; the model fallback when a component names no model.
    pub language: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl PipelineConfig {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

/// Process configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `LANGMODEL_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pipeline language. Default: `en`.
    pub language: String,

    /// Explicit model name or path. Default: unset (falls back to `language`).
    pub model: Option<String>,

    /// Keep casing when building docs. Default: `false`.
    pub case_sensitive: bool,

    /// Directory holding linked / installed models. Default: `./models`.
    pub data_path: PathBuf,

    /// Texts per tokenizer batch. Default: `50`.
    pub batch_size: usize,

    /// Max adapters held by the component cache. Default: `16`.
    pub cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            model: None,
            case_sensitive: false,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            batch_size: DEFAULT_BATCH_SIZE,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_LANGUAGE: &'static str = "LANGMODEL_LANGUAGE";
    const ENV_MODEL: &'static str = "LANGMODEL_MODEL";
    const ENV_CASE_SENSITIVE: &'static str = "LANGMODEL_CASE_SENSITIVE";
    const ENV_DATA_PATH: &'static str = "LANGMODEL_DATA_PATH";
    const ENV_BATCH_SIZE: &'static str = "LANGMODEL_BATCH_SIZE";
    const ENV_CACHE_CAPACITY: &'static str = "LANGMODEL_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let language = Self::parse_string_from_env(Self::ENV_LANGUAGE, defaults.language);
        let model = Self::parse_optional_string_from_env(Self::ENV_MODEL);
        let case_sensitive =
            Self::parse_bool_from_env(Self::ENV_CASE_SENSITIVE, defaults.case_sensitive)?;
        let data_path = Self::parse_path_from_env(Self::ENV_DATA_PATH, defaults.data_path);
        let batch_size = Self::parse_usize_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?;
        let cache_capacity =
            Self::parse_usize_from_env(Self::ENV_CACHE_CAPACITY, defaults.cache_capacity as usize)?
                as u64;

        Ok(Self {
            language,
            model,
            case_sensitive,
            data_path,
            batch_size,
            cache_capacity,
        })
    }

    /// Validates basic invariants (does not touch the model itself).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }

        if self.language.trim().is_empty() && self.model.is_none() {
            return Err(ConfigError::MissingLanguage);
        }

        if self.data_path.exists() && !self.data_path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.data_path.clone(),
            });
        }

        Ok(())
    }

    pub fn pipeline(&self) -> PipelineConfig {
        PipelineConfig::new(self.language.clone())
    }

    /// Component options as the host would hand them to the adapter.
    pub fn adapter_options(&self) -> AdapterOptions {
        AdapterOptions {
            model: self.model.clone(),
            case_sensitive: self.case_sensitive,
            batch_size: self.batch_size,
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_optional_string_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        Self::parse_optional_string_from_env(var_name)
            .map(PathBuf::from)
            .unwrap_or(default)
    }

    fn parse_bool_from_env(name: &'static str, default: bool) -> Result<bool, ConfigError> {
        match env::var(name) {
            Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                "" => Ok(default),
                _ => Err(ConfigError::InvalidBool { name, value }),
            },
            Err(_) => Ok(default),
        }
    }

    fn parse_usize_from_env(name: &'static str, default: usize) -> Result<usize, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::InvalidNumber {
                    name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }
}
