//! Language model adapter for NLU pipelines.
//!
//! Loads a language model (tokenizer plus optional static vectors) once per
//! configuration and attaches its [`Doc`]s to pipeline messages.
//!
//! # Public API Surface
//!
//! ## Component
//! - [`ModelAdapter`], [`AdapterOptions`], [`AdapterError`] - the pipeline component
//! - [`ComponentCache`], [`MokaComponentCache`] - injected component cache
//! - [`reorder_batch`] - order-preserving batch processing
//!
//! ## Model
//! - [`BatchInferer`], [`ModelLoader`] - the seams the adapter depends on
//! - [`Language`], [`DirectoryLoader`] - on-disk model implementation
//! - [`Doc`], [`Token`], [`Vocab`] - model output
//!
//! ## Host data
//! - [`Message`], [`TrainingData`], [`Attribute`]
//! - [`process_lines`] - JSON-lines message stream
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod adapter;
pub mod config;
pub mod constants;
pub mod hashing;
pub mod message;
pub mod model;
pub mod stream;

pub use adapter::{
    AdapterError, AdapterInit, AdapterOptions, AdapterResult, ComponentCache, ComponentContext,
    MokaComponentCache, ModelAdapter, ProcessedSample, Sample, cache_key, preprocess,
    reorder_batch, resolve_model_name,
};
pub use config::{Config, ConfigError, PipelineConfig};
pub use message::{Attribute, DENSE_FEATURIZABLE_ATTRIBUTES, Message, TrainingData};
pub use model::{
    BatchInferer, DirectoryLoader, Doc, Language, ModelError, ModelHandle, ModelLoader,
    ModelMeta, StaticVectors, Token, Vocab,
};
pub use stream::{StreamError, StreamResult, process_lines};

#[cfg(any(test, feature = "mock"))]
pub use model::{MockInferer, MockLoader, write_test_model, write_test_vectors};
