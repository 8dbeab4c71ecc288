//! Tokenizer-backed language model loaded from a model directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use candle_core::Device;
use tokenizers::{Encoding, Tokenizer};
use tracing::{debug, info, warn};

use super::doc::{Doc, Token, Vocab};
use super::error::ModelError;
use super::inferer::BatchInferer;
use super::meta::ModelMeta;
use super::utils::load_tokenizer;
use super::vectors::StaticVectors;
use crate::constants::{META_FILENAME, PIPE_VECTORS, TOKENIZER_FILENAME, VECTORS_FILENAME};
use crate::hashing::fingerprint_file;

/// A loaded language model: tokenizer, vocabulary and optional static vectors.
pub struct Language {
    meta: ModelMeta,
    path: Option<PathBuf>,
    tokenizer: Tokenizer,
    vocab: Arc<Vocab>,
    vectors: Option<StaticVectors>,
    pipe_names: Vec<String>,
    disabled: Vec<String>,
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("name", &self.meta.full_name())
            .field("path", &self.path)
            .field("vocab", &self.vocab)
            .field("pipe_names", &self.pipe_names)
            .field("disabled", &self.disabled)
            .finish()
    }
}

impl Language {
    /// Loads a model directory (`meta.json`, `tokenizer.json`, optional vectors).
    pub fn from_dir(dir: &Path, disable: &[&str], device: &Device) -> Result<Self, ModelError> {
        let meta_path = dir.join(META_FILENAME);
        if !meta_path.is_file() {
            return Err(ModelError::LoadFailed {
                reason: format!("missing {} in {}", META_FILENAME, dir.display()),
            });
        }
        let mut meta: ModelMeta = serde_json::from_str(&std::fs::read_to_string(&meta_path)?)?;

        let tokenizer = load_tokenizer(dir).map_err(|e| ModelError::LoadFailed {
            reason: format!("failed to load tokenizer: {}", e),
        })?;
        meta.fingerprint = fingerprint_file(&dir.join(TOKENIZER_FILENAME)).ok();

        let pipe_names = meta.enabled_pipes(disable);
        let vectors = if pipe_names.iter().any(|p| p == PIPE_VECTORS) {
            let vectors_path = dir.join(VECTORS_FILENAME);
            if vectors_path.is_file() {
                Some(StaticVectors::load(&vectors_path, device)?)
            } else {
                warn!(
                    path = %dir.display(),
                    "Model lists a vectors pipe but has no {}; docs will have no vectors",
                    VECTORS_FILENAME
                );
                None
            }
        } else {
            None
        };

        let vocab = Arc::new(Vocab::new(
            meta.lang.clone(),
            tokenizer.get_vocab_size(true),
            vectors.as_ref().map_or(0, StaticVectors::width),
        ));

        let path = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());

        info!(
            model = %meta.full_name(),
            path = %path.display(),
            vocab_size = vocab.size,
            vectors_width = vocab.vectors_width,
            fingerprint = meta.fingerprint.as_deref().unwrap_or("-"),
            pipes = ?pipe_names,
            "Language model loaded"
        );

        Ok(Self {
            meta,
            path: Some(path),
            tokenizer,
            vocab,
            vectors,
            pipe_names,
            disabled: disable.iter().map(|s| s.to_string()).collect(),
        })
    }

    /// In-memory model with no backing directory. Only tokenizes.
    pub fn blank(lang: impl Into<String>, tokenizer: Tokenizer) -> Self {
        let meta = ModelMeta::blank(lang);
        let vocab = Arc::new(Vocab::new(
            meta.lang.clone(),
            tokenizer.get_vocab_size(true),
            0,
        ));
        let pipe_names = meta.pipeline.clone();

        Self {
            meta,
            path: None,
            tokenizer,
            vocab,
            vectors: None,
            pipe_names,
            disabled: Vec::new(),
        }
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    /// Enabled sub-pipelines.
    pub fn pipe_names(&self) -> &[String] {
        &self.pipe_names
    }

    pub fn disabled(&self) -> &[String] {
        &self.disabled
    }

    pub fn has_vectors(&self) -> bool {
        self.vectors.is_some()
    }

    fn build_doc(&self, text: &str, encoding: &Encoding) -> Result<Doc, ModelError> {
        let ids = encoding.get_ids();
        let vectors = match &self.vectors {
            Some(vectors) => Some(vectors.lookup(ids)?),
            None => None,
        };

        let tokens = ids
            .iter()
            .zip(encoding.get_offsets())
            .zip(encoding.get_tokens())
            .enumerate()
            .map(|(i, ((&id, &(start, end)), surface))| Token {
                text: text
                    .get(start..end)
                    .map(str::to_string)
                    .unwrap_or_else(|| surface.clone()),
                id,
                start,
                end,
                vector: vectors.as_ref().and_then(|v| v.get(i).cloned()),
            })
            .collect();

        Ok(Doc::new(Arc::clone(&self.vocab), text, tokens))
    }
}

impl BatchInferer for Language {
    fn pipe(&self, texts: &[&str], batch_size: usize) -> Result<Vec<Doc>, ModelError> {
        let batch_size = batch_size.max(1);
        let mut docs = Vec::with_capacity(texts.len());

        for chunk in texts.chunks(batch_size) {
            debug!(chunk_len = chunk.len(), "Tokenizing batch");
            let encodings = self
                .tokenizer
                .encode_batch(chunk.to_vec(), false)
                .map_err(|e| ModelError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

            for (text, encoding) in chunk.iter().zip(&encodings) {
                docs.push(self.build_doc(text, encoding)?);
            }
        }

        Ok(docs)
    }

    fn doc(&self, text: &str) -> Result<Doc, ModelError> {
        let encoding =
            self.tokenizer
                .encode(text, false)
                .map_err(|e| ModelError::TokenizationFailed {
                    reason: e.to_string(),
                })?;
        self.build_doc(text, &encoding)
    }

    fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
