//! Mock model + loader, plus an on-disk model fixture writer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::json;

use super::doc::{Doc, Token, Vocab};
use super::error::ModelError;
use super::inferer::{BatchInferer, ModelHandle, ModelLoader};
use crate::constants::{META_FILENAME, TOKENIZER_FILENAME};

/// Whitespace-tokenizing model that records every batch it is given.
#[derive(Debug)]
pub struct MockInferer {
    vocab: Arc<Vocab>,
    path: Option<PathBuf>,
    drop_last: bool,
    batches: Mutex<Vec<Vec<String>>>,
    singles: Mutex<Vec<String>>,
}

impl MockInferer {
    const VOCAB_SIZE: usize = 1024;

    /// A mock that looks disk-backed (path is set).
    pub fn new(lang: &str) -> Self {
        Self {
            vocab: Arc::new(Vocab::new(lang, Self::VOCAB_SIZE, 0)),
            path: Some(PathBuf::from(format!("/mock/models/{lang}"))),
            drop_last: false,
            batches: Mutex::new(Vec::new()),
            singles: Mutex::new(Vec::new()),
        }
    }

    /// A mock with no on-disk path.
    pub fn blank(lang: &str) -> Self {
        Self {
            path: None,
            ..Self::new(lang)
        }
    }

    /// Makes `pipe` return one doc fewer than requested.
    pub fn dropping_last(mut self) -> Self {
        self.drop_last = true;
        self
    }

    /// Texts passed to each `pipe` call, in call order.
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().clone()
    }

    /// Texts passed to `doc`, in call order.
    pub fn singles(&self) -> Vec<String> {
        self.singles.lock().clone()
    }

    fn tokenize(&self, text: &str) -> Doc {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for word in text.split_whitespace() {
            let start = text[offset..].find(word).map_or(offset, |i| offset + i);
            let end = start + word.len();
            offset = end;

            let hash = crate::hashing::hash_bytes(word.as_bytes());
            let id = u32::from_le_bytes([hash[0], hash[1], hash[2], hash[3]])
                % Self::VOCAB_SIZE as u32;

            tokens.push(Token {
                text: word.to_string(),
                id,
                start,
                end,
                vector: None,
            });
        }
        Doc::new(Arc::clone(&self.vocab), text, tokens)
    }
}

impl BatchInferer for MockInferer {
    fn pipe(&self, texts: &[&str], _batch_size: usize) -> Result<Vec<Doc>, ModelError> {
        self.batches
            .lock()
            .push(texts.iter().map(|t| t.to_string()).collect());

        let mut docs: Vec<Doc> = texts.iter().map(|t| self.tokenize(t)).collect();
        if self.drop_last {
            docs.pop();
        }
        Ok(docs)
    }

    fn doc(&self, text: &str) -> Result<Doc, ModelError> {
        self.singles.lock().push(text.to_string());
        Ok(self.tokenize(text))
    }

    fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Loader backed by a fixed name -> model table.
///
/// A name mapped to `None` simulates a loader that returns no model.
#[derive(Default)]
pub struct MockLoader {
    models: HashMap<String, Option<Arc<MockInferer>>>,
    requests: Mutex<Vec<(String, Vec<String>)>>,
}

impl MockLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, name: &str, model: Arc<MockInferer>) -> Self {
        self.models.insert(name.to_string(), Some(model));
        self
    }

    pub fn with_null_model(mut self, name: &str) -> Self {
        self.models.insert(name.to_string(), None);
        self
    }

    /// `(name, disabled pipes)` of every `load` call.
    pub fn requests(&self) -> Vec<(String, Vec<String>)> {
        self.requests.lock().clone()
    }
}

impl ModelLoader for MockLoader {
    fn load(&self, name: &str, disable: &[&str]) -> Result<Option<ModelHandle>, ModelError> {
        self.requests.lock().push((
            name.to_string(),
            disable.iter().map(|s| s.to_string()).collect(),
        ));

        match self.models.get(name) {
            Some(Some(model)) => Ok(Some(Arc::clone(model) as ModelHandle)),
            Some(None) => Ok(None),
            None => Err(ModelError::NotFound {
                name: name.to_string(),
                data_path: PathBuf::from("/mock/models"),
            }),
        }
    }
}

/// Writes a word-level model directory (`meta.json` + `tokenizer.json`).
///
/// Word ids start at 1; id 0 is `[UNK]`.
pub fn write_test_model(dir: &Path, lang: &str, name: &str, words: &[&str]) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)?;

    let mut vocab = serde_json::Map::new();
    vocab.insert("[UNK]".to_string(), json!(0));
    for (i, word) in words.iter().enumerate() {
        vocab.insert(word.to_string(), json!(i + 1));
    }

    let tokenizer = json!({
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "WhitespaceSplit" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": vocab,
            "unk_token": "[UNK]"
        }
    });
    std::fs::write(
        dir.join(TOKENIZER_FILENAME),
        serde_json::to_string_pretty(&tokenizer)?,
    )?;

    let meta = json!({
        "lang": lang,
        "name": name,
        "version": "0.1.0",
        "pipeline": ["tokenizer", "vectors", "parser"]
    });
    std::fs::write(dir.join(META_FILENAME), serde_json::to_string_pretty(&meta)?)?;

    Ok(())
}

/// Writes `vectors.safetensors` with `rows` rows; every element of row `i` is `i`.
pub fn write_test_vectors(dir: &Path, rows: usize, width: usize) -> Result<(), ModelError> {
    use candle_core::{Device, Tensor};

    let data: Vec<f32> = (0..rows * width).map(|i| (i / width) as f32).collect();
    let tensor = Tensor::from_vec(data, (rows, width), &Device::Cpu)?;
    tensor.save_safetensors(
        crate::constants::VECTORS_TENSOR_NAME,
        dir.join(crate::constants::VECTORS_FILENAME),
    )?;
    Ok(())
}
