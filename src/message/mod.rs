//! Host pipeline data: messages and training data.
//!
//! A [`Message`] carries raw text per [`Attribute`] and, once processed, one
//! [`Doc`] per attribute under that attribute's doc key.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::model::Doc;


/// Text attributes a language model produces docs for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Attribute {
    Text,
    Response,
    ActionText,
}

/// Attributes that get docs, in processing order.
pub const DENSE_FEATURIZABLE_ATTRIBUTES: [Attribute; 3] =
    [Attribute::Text, Attribute::Response, Attribute::ActionText];

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Response => "response",
            Self::ActionText => "action_text",
        }
    }

    /// Key the attribute's doc is stored under.
    pub fn doc_key(&self) -> &'static str {
        match self {
            Self::Text => "text_doc",
            Self::Response => "response_doc",
            Self::ActionText => "action_text_doc",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One sample / incoming message.
///
/// Deserializes from a flat object (`{"text": ..., "response": ...}`); other
/// keys are ignored. Serializes the texts flat plus a `docs` object keyed by
/// [`Attribute::doc_key`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawMessage")]
pub struct Message {
    #[serde(flatten)]
    texts: HashMap<Attribute, String>,
    #[serde(
        skip_serializing_if = "HashMap::is_empty",
        serialize_with = "serialize_docs"
    )]
    docs: HashMap<Attribute, Doc>,
}

fn serialize_docs<S: Serializer>(
    docs: &HashMap<Attribute, Doc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let by_key: BTreeMap<&'static str, &Doc> =
        docs.iter().map(|(attr, doc)| (attr.doc_key(), doc)).collect();
    by_key.serialize(serializer)
}

#[derive(Deserialize)]
struct RawMessage {
    text: Option<String>,
    response: Option<String>,
    action_text: Option<String>,
}

impl From<RawMessage> for Message {
    fn from(raw: RawMessage) -> Self {
        let texts = [
            (Attribute::Text, raw.text),
            (Attribute::Response, raw.response),
            (Attribute::ActionText, raw.action_text),
        ]
        .into_iter()
        .filter_map(|(attr, text)| text.map(|t| (attr, t)))
        .collect();

        Self {
            texts,
            docs: HashMap::new(),
        }
    }
}

impl Message {
    pub fn new() -> Self {
        Self::default()
    }

    /// Message with only the `text` attribute set.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut message = Self::new();
        message.set_text(Attribute::Text, text);
        message
    }

    pub fn with(mut self, attribute: Attribute, text: impl Into<String>) -> Self {
        self.set_text(attribute, text);
        self
    }

    /// Raw text of `attribute`, if set.
    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        self.texts.get(&attribute).map(String::as_str)
    }

    pub fn set_text(&mut self, attribute: Attribute, text: impl Into<String>) {
        self.texts.insert(attribute, text.into());
    }

    /// Doc stored for `attribute`, if any.
    pub fn doc(&self, attribute: Attribute) -> Option<&Doc> {
        self.docs.get(&attribute)
    }

    pub fn set_doc(&mut self, attribute: Attribute, doc: Doc) {
        self.docs.insert(attribute, doc);
    }

    /// Docs keyed by [`Attribute::doc_key`].
    pub fn docs_by_key(&self) -> impl Iterator<Item = (&'static str, &Doc)> {
        self.docs.iter().map(|(attr, doc)| (attr.doc_key(), doc))
    }
}

/// Ordered training examples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrainingData {
    pub training_examples: Vec<Message>,
}

impl TrainingData {
    pub fn new(training_examples: Vec<Message>) -> Self {
        Self { training_examples }
    }

    pub fn len(&self) -> usize {
        self.training_examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.training_examples.is_empty()
    }
}
