//! Language model backend.
//!
//! - [`BatchInferer`] / [`ModelLoader`] are the seams the adapter depends on.
//! - [`Language`] + [`DirectoryLoader`] are the on-disk implementation
//!   (HuggingFace tokenizer, optional candle vector table).

/// Device selection (CPU / Metal / CUDA).
pub mod device;
pub mod doc;
mod error;
pub mod inferer;
pub mod language;
pub mod loader;
pub mod meta;
/// Tokenizer loading helpers.
pub mod utils;
pub mod vectors;

#[cfg(any(test, feature = "mock"))]
pub mod mock;


pub use doc::{Doc, Token, Vocab};
pub use error::ModelError;
pub use inferer::{BatchInferer, ModelHandle, ModelLoader};
pub use language::Language;
pub use loader::DirectoryLoader;
pub use meta::ModelMeta;
pub use vectors::StaticVectors;

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockInferer, MockLoader, write_test_model, write_test_vectors};
