use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a language model or running it.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The name is neither a model directory nor linked under the data path.
    #[error(
        "model '{name}' is not a linked language model. \
         Please download and/or link a model, e.g. by running:\n\
         \x20 cp -r /path/to/en_core_web_md {data_path}/en_core_web_md\n\
         \x20 ln -s {data_path}/en_core_web_md {data_path}/en"
    )]
    NotFound { name: String, data_path: PathBuf },

    /// The model loaded but cannot be used (no handle, or not backed by disk).
    #[error("invalid language model: {reason}")]
    InvalidModel { reason: String },

    #[error("failed to load language model: {reason}")]
    LoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("vector lookup failed: {reason}")]
    InferenceFailed { reason: String },

    /// The batch call returned a different number of docs than texts it was given.
    #[error("batch inference returned {actual} docs for {expected} texts")]
    BatchSizeMismatch { expected: usize, actual: usize },
}

impl ModelError {
    /// Returns `true` for the two errors that make a component unconstructible
    /// because of the model itself.
    pub fn is_model_unusable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InvalidModel { .. })
    }
}

impl From<candle_core::Error> for ModelError {
    fn from(err: candle_core::Error) -> Self {
        ModelError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ModelError {
    fn from(err: std::io::Error) -> Self {
        ModelError::LoadFailed {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ModelError {
    fn from(err: serde_json::Error) -> Self {
        ModelError::LoadFailed {
            reason: format!("invalid {}: {}", crate::constants::META_FILENAME, err),
        }
    }
}
