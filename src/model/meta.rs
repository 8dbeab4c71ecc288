use serde::{Deserialize, Serialize};

use crate::constants::{PIPE_PARSER, PIPE_TOKENIZER, PIPE_VECTORS};

/// Contents of a model directory's `meta.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub lang: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default = "default_pipeline")]
    pub pipeline: Vec<String>,
    /// Short BLAKE3 fingerprint of `tokenizer.json`; filled in at load time.
    #[serde(skip)]
    pub fingerprint: Option<String>,
}

fn default_pipeline() -> Vec<String> {
    vec![
        PIPE_TOKENIZER.to_string(),
        PIPE_VECTORS.to_string(),
        PIPE_PARSER.to_string(),
    ]
}

impl ModelMeta {
    /// Meta for an in-memory model with only a tokenizer.
    pub fn blank(lang: impl Into<String>) -> Self {
        Self {
            lang: lang.into(),
            name: "blank".to_string(),
            version: String::new(),
            pipeline: vec![PIPE_TOKENIZER.to_string()],
            fingerprint: None,
        }
    }

    /// `"{lang}_{name}"`, or just the language when the model is unnamed.
    pub fn full_name(&self) -> String {
        if self.name.is_empty() {
            self.lang.clone()
        } else {
            format!("{}_{}", self.lang, self.name)
        }
    }

    /// Pipe names from `pipeline` that are not in `disable`.
    pub fn enabled_pipes(&self, disable: &[&str]) -> Vec<String> {
        self.pipeline
            .iter()
            .filter(|pipe| !disable.contains(&pipe.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_defaults() {
        let meta: ModelMeta = serde_json::from_str(r#"{"lang": "de"}"#).unwrap();
        assert_eq!(meta.lang, "de");
        assert!(meta.name.is_empty());
        assert_eq!(meta.pipeline, default_pipeline());
        assert_eq!(meta.full_name(), "de");
    }

    #[test]
    fn test_meta_full_name() {
        let meta: ModelMeta =
            serde_json::from_str(r#"{"lang": "en", "name": "core_web_md", "version": "3.7.0"}"#)
                .unwrap();
        assert_eq!(meta.full_name(), "en_core_web_md");
    }

    #[test]
    fn test_enabled_pipes_excludes_disabled() {
        let meta = ModelMeta {
            pipeline: default_pipeline(),
            ..ModelMeta::blank("en")
        };
        let pipes = meta.enabled_pipes(&[PIPE_PARSER]);
        assert_eq!(pipes, vec![PIPE_TOKENIZER, PIPE_VECTORS]);
    }

    #[test]
    fn test_meta_requires_lang() {
        let result: Result<ModelMeta, _> = serde_json::from_str(r#"{"name": "x"}"#);
        assert!(result.is_err());
    }
}
