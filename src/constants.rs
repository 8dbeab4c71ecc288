//! Cross-cutting, shared constants.
//!
//! Attribute names and doc keys live in [`crate::message`]; everything here is
//! either a default or a file name inside a model directory.

/// Pipeline language used when neither the component nor the pipeline names one.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Number of texts handed to the tokenizer per `encode_batch` call.
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Directory searched for linked / installed models. Default: `./models`.
pub const DEFAULT_DATA_PATH: &str = "./models";

/// Max adapters kept alive by the component cache.
pub const DEFAULT_CACHE_CAPACITY: u64 = 16;

/// Sub-pipelines switched off when the adapter loads a model.
pub const DISABLED_PIPES: &[&str] = &[PIPE_PARSER];

pub const PIPE_TOKENIZER: &str = "tokenizer";
pub const PIPE_VECTORS: &str = "vectors";
pub const PIPE_PARSER: &str = "parser";

pub const META_FILENAME: &str = "meta.json";
pub const TOKENIZER_FILENAME: &str = "tokenizer.json";
pub const VECTORS_FILENAME: &str = "vectors.safetensors";

/// Tensor name looked up inside [`VECTORS_FILENAME`].
pub const VECTORS_TENSOR_NAME: &str = "vectors";
