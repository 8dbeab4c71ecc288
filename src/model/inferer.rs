use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::doc::{Doc, Vocab};
use super::error::ModelError;

/// Narrow view of a loaded language model used by the adapter.
///
/// Implementations must be safe for concurrent read-only use; nothing here takes
/// `&mut self`.
pub trait BatchInferer: Send + Sync + fmt::Debug {
    /// Processes `texts` in chunks of `batch_size`, returning exactly one doc per
    /// text in input order.
    fn pipe(&self, texts: &[&str], batch_size: usize) -> Result<Vec<Doc>, ModelError>;

    /// Processes a single text.
    fn doc(&self, text: &str) -> Result<Doc, ModelError>;

    fn vocab(&self) -> &Arc<Vocab>;

    /// Directory the model was loaded from; `None` for in-memory (blank) models.
    fn path(&self) -> Option<&Path>;

    fn lang(&self) -> &str {
        &self.vocab().lang
    }

    /// Placeholder doc for empty input, sharing this model's vocabulary.
    fn empty_doc(&self) -> Doc {
        Doc::empty(Arc::clone(self.vocab()))
    }
}

/// Shared, read-only handle to a loaded model.
pub type ModelHandle = Arc<dyn BatchInferer>;

/// Resolves a model name to a loaded model.
pub trait ModelLoader: Send + Sync {
    /// Loads `name` with the sub-pipelines in `disable` switched off.
    ///
    /// `Ok(None)` means the loader produced no model at all; callers treat that
    /// as an invalid model rather than a missing one.
    fn load(&self, name: &str, disable: &[&str]) -> Result<Option<ModelHandle>, ModelError>;
}
