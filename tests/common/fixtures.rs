//! Test fixtures for integration tests.

use std::path::{Path, PathBuf};

use candle_core::Device;
use langmodel::{DirectoryLoader, Message, write_test_model, write_test_vectors};
use tempfile::TempDir;

pub const WORDS: &[&str] = &[
    "hello", "hi", "there", "book", "a", "flight", "to", "berlin", "utter_greet",
];

pub const VECTOR_WIDTH: usize = 8;

/// Temporary data path holding one model per [`ModelDirBuilder::build`] call.
pub struct ModelFixture {
    pub root: TempDir,
}

impl ModelFixture {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("tempdir"),
        }
    }

    pub fn data_path(&self) -> &Path {
        self.root.path()
    }

    pub fn loader(&self) -> DirectoryLoader {
        DirectoryLoader::with_device(self.data_path(), Device::Cpu)
    }

    pub fn model(&self, dir_name: &str) -> ModelDirBuilder<'_> {
        ModelDirBuilder {
            fixture: self,
            dir_name: dir_name.to_string(),
            lang: "en".to_string(),
            vectors: false,
        }
    }
}

pub struct ModelDirBuilder<'a> {
    fixture: &'a ModelFixture,
    dir_name: String,
    lang: String,
    vectors: bool,
}

impl ModelDirBuilder<'_> {
    pub fn lang(mut self, lang: &str) -> Self {
        self.lang = lang.to_string();
        self
    }

    pub fn with_vectors(mut self) -> Self {
        self.vectors = true;
        self
    }

    pub fn build(self) -> PathBuf {
        let dir = self.fixture.data_path().join(&self.dir_name);
        write_test_model(&dir, &self.lang, "test_sm", WORDS).expect("write model");
        if self.vectors {
            write_test_vectors(&dir, WORDS.len() + 1, VECTOR_WIDTH).expect("write vectors");
        }
        dir
    }
}

pub fn sample_messages() -> Vec<Message> {
    serde_json::from_str(
        r#"[
            {"text": "Hello there", "intent": "greet"},
            {"response": "Hi", "action_text": "utter_greet"},
            {"text": "", "response": ""},
            {"text": "Book a flight to Berlin"}
        ]"#,
    )
    .expect("valid messages")
}
