//! Doc representation produced by a language model.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Vocabulary shared by a model and every doc it produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocab {
    /// Language code, e.g. `en`.
    pub lang: String,
    /// Number of entries in the tokenizer vocabulary.
    pub size: usize,
    /// Width of the static vectors (`0` when the model has none).
    pub vectors_width: usize,
}

impl Vocab {
    pub fn new(lang: impl Into<String>, size: usize, vectors_width: usize) -> Self {
        Self {
            lang: lang.into(),
            size,
            vectors_width,
        }
    }
}

/// A single token of a [`Doc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// Surface form (slice of the input text).
    pub text: String,
    /// Vocabulary id.
    pub id: u32,
    /// Byte offset where the token starts.
    pub start: usize,
    /// Byte offset where the token ends (exclusive).
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vector: Option<Vec<f32>>,
}

/// Tokens (and optional vectors) for one text.
///
/// A doc with no tokens is the placeholder for empty input; see [`Doc::empty`].
#[derive(Debug, Clone, Serialize)]
pub struct Doc {
    #[serde(skip)]
    vocab: Arc<Vocab>,
    text: String,
    tokens: Vec<Token>,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector: Option<Vec<f32>>,
}

impl PartialEq for Doc {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.tokens == other.tokens && self.vector == other.vector
    }
}

impl Doc {
    /// Builds a doc; the doc vector is the mean of the token vectors, if every
    /// token has one.
    pub fn new(vocab: Arc<Vocab>, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        let vector = mean_vector(&tokens);
        Self {
            vocab,
            text: text.into(),
            tokens,
            vector,
        }
    }

    /// Placeholder doc for empty input.
    pub fn empty(vocab: Arc<Vocab>) -> Self {
        Self {
            vocab,
            text: String::new(),
            tokens: Vec::new(),
            vector: None,
        }
    }

    /// Number of tokens.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn vector(&self) -> Option<&[f32]> {
        self.vector.as_deref()
    }

    pub fn has_vector(&self) -> bool {
        self.vector.is_some()
    }

    pub fn vocab(&self) -> &Arc<Vocab> {
        &self.vocab
    }

    /// Cosine similarity of the two doc vectors (`None` if either has no vector).
    pub fn similarity(&self, other: &Doc) -> Option<f32> {
        let a = self.vector()?;
        let b = other.vector()?;
        if a.len() != b.len() {
            return None;
        }

        let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return Some(0.0);
        }
        Some(dot / (norm_a * norm_b))
    }
}

fn mean_vector(tokens: &[Token]) -> Option<Vec<f32>> {
    let first = tokens.first()?.vector.as_ref()?;
    let mut sum = vec![0.0f32; first.len()];

    for token in tokens {
        let vector = token.vector.as_ref()?;
        if vector.len() != sum.len() {
            return None;
        }
        for (acc, v) in sum.iter_mut().zip(vector) {
            *acc += v;
        }
    }

    let n = tokens.len() as f32;
    for acc in &mut sum {
        *acc /= n;
    }
    Some(sum)
}
