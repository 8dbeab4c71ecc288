use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BATCH_SIZE;

/// Component options persisted by the host pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterOptions {
    /// Model name or path. When unset, the pipeline language is used (e.g. `en`).
    pub model: Option<String>,
    /// When `false`, text is lower-cased before it reaches the model, so
    /// `hello` and `Hello` produce the same tokens and vectors.
    pub case_sensitive: bool,
    /// Texts per batch handed to the model.
    pub batch_size: usize,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            model: None,
            case_sensitive: false,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl AdapterOptions {
    /// Defaults overridden by whatever keys `overrides` sets.
    pub fn from_json(overrides: &serde_json::Value) -> Result<Self, serde_json::Error> {
        if overrides.is_null() {
            return Ok(Self::default());
        }
        Self::deserialize(overrides)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }
}
