use std::sync::Arc;

use thiserror::Error;

use crate::config::ConfigError;
use crate::model::ModelError;

/// Errors raised while constructing a [`super::ModelAdapter`].
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Failure of a cache init that other callers were also waiting on.
    #[error(transparent)]
    Shared(Arc<AdapterError>),
}

impl AdapterError {
    /// The underlying model error, if any.
    pub fn model_error(&self) -> Option<&ModelError> {
        match self {
            Self::Model(err) => Some(err),
            Self::Config(_) => None,
            Self::Shared(inner) => inner.model_error(),
        }
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
