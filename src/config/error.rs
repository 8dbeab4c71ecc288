//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A boolean variable held something other than a recognised boolean.
    #[error("failed to parse boolean {name}='{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// A numeric variable could not be parsed.
    #[error("failed to parse {name}='{value}': {source}")]
    InvalidNumber {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Batch size must be at least 1.
    #[error("batch size must be greater than zero")]
    ZeroBatchSize,

    /// Neither a model name nor a language was configured.
    #[error("no model name or pipeline language configured")]
    MissingLanguage,

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
