//! Pipeline component that loads a language model and attaches its docs.
//!
//! Construction resolves the model name (explicit option, else the pipeline
//! language), loads it with the parser disabled and rejects unusable models.
//! Training runs every dense attribute of every example through the model's
//! batch call; inference processes one message at a time.

pub mod batch;
pub mod cache;
mod error;
mod options;


pub use batch::{ProcessedSample, Sample, reorder_batch};
pub use cache::{AdapterInit, ComponentCache, MokaComponentCache};
pub use error::{AdapterError, AdapterResult};
pub use options::AdapterOptions;

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::{ConfigError, PipelineConfig};
use crate::constants::DISABLED_PIPES;
use crate::message::{Attribute, DENSE_FEATURIZABLE_ATTRIBUTES, Message, TrainingData};
use crate::model::{Doc, ModelError, ModelHandle, ModelLoader};

/// What the adapter hands to later pipeline components.
#[derive(Debug, Clone)]
pub struct ComponentContext {
    pub language_model: ModelHandle,
}

/// Loads a language model once and produces docs for messages.
pub struct ModelAdapter {
    options: AdapterOptions,
    model: ModelHandle,
}

impl std::fmt::Debug for ModelAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelAdapter")
            .field("options", &self.options)
            .field("lang", &self.model.lang())
            .field("path", &self.model.path())
            .finish()
    }
}

impl ModelAdapter {
    /// Component name used as the cache key prefix.
    pub const NAME: &'static str = "LanguageModelAdapter";

    /// Wraps an already validated model.
    pub fn new(options: AdapterOptions, model: ModelHandle) -> Self {
        Self { options, model }
    }

    pub fn defaults() -> AdapterOptions {
        AdapterOptions::default()
    }

    /// Builds the component before training.
    ///
    /// The resolved model name is written back into the options so that it is
    /// persisted with the component.
    pub fn create(
        mut options: AdapterOptions,
        pipeline: &PipelineConfig,
        loader: &dyn ModelLoader,
    ) -> AdapterResult<Self> {
        let model_name =
            resolve_model_name(options.model.as_deref().unwrap_or(""), &pipeline.language);
        if model_name.is_empty() {
            return Err(ConfigError::MissingLanguage.into());
        }
        options.model = Some(model_name.clone());

        info!(model = %model_name, "Trying to load language model");
        let handle = Self::load(loader, &model_name)?;
        let model = Arc::clone(Self::validate(handle.as_ref())?);

        Ok(Self::new(options, model))
    }

    /// Restores the component from persisted options, reusing `cached` if given.
    pub fn load_from_meta(
        options: AdapterOptions,
        pipeline: &PipelineConfig,
        loader: &dyn ModelLoader,
        cached: Option<Arc<Self>>,
    ) -> AdapterResult<Arc<Self>> {
        if let Some(cached) = cached {
            debug!("Reusing cached language model adapter");
            return Ok(cached);
        }
        Self::create(options, pipeline, loader).map(Arc::new)
    }

    /// [`Self::create`] backed by an injected cache.
    ///
    /// The adapter is created at most once per cache key, even when several
    /// callers miss at the same time.
    pub fn load_cached(
        cache: &dyn ComponentCache,
        options: AdapterOptions,
        pipeline: &PipelineConfig,
        loader: &dyn ModelLoader,
    ) -> AdapterResult<Arc<Self>> {
        let key = cache_key(Self::NAME, options.model.as_deref(), &pipeline.language);
        debug!(%key, "Looking up cached language model adapter");

        cache.get_or_try_insert_with(
            key,
            Box::new(move || Self::create(options, pipeline, loader).map(Arc::new)),
        )
    }

    /// Asks the loader for `model_name` with the parser disabled.
    pub fn load(
        loader: &dyn ModelLoader,
        model_name: &str,
    ) -> Result<Option<ModelHandle>, ModelError> {
        loader.load(model_name, DISABLED_PIPES)
    }

    /// Rejects a missing handle, or one that was not loaded from disk.
    pub fn validate(handle: Option<&ModelHandle>) -> Result<&ModelHandle, ModelError> {
        let handle = handle.ok_or_else(|| ModelError::InvalidModel {
            reason: "loading the model returned no model".to_string(),
        })?;

        if handle.path().is_none() {
            return Err(ModelError::InvalidModel {
                reason: format!(
                    "model for lang '{}' was not loaded from disk. \
                     Make sure you have downloaded the correct model",
                    handle.lang()
                ),
            });
        }

        Ok(handle)
    }

    pub fn options(&self) -> &AdapterOptions {
        &self.options
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    /// This component's key in a [`ComponentCache`].
    pub fn cache_key(&self) -> String {
        cache_key(Self::NAME, self.options.model.as_deref(), self.model.lang())
    }

    pub fn provide_context(&self) -> ComponentContext {
        ComponentContext {
            language_model: Arc::clone(&self.model),
        }
    }

    pub fn preprocess(&self, text: Option<&str>) -> String {
        preprocess(text, self.options.case_sensitive)
    }

    /// Docs for every dense attribute of `examples`, each list in example order.
    pub fn run_for_batch(
        &self,
        examples: &[Message],
    ) -> Result<HashMap<Attribute, Vec<Doc>>, ModelError> {
        let mut attribute_docs = HashMap::with_capacity(DENSE_FEATURIZABLE_ATTRIBUTES.len());

        for attribute in DENSE_FEATURIZABLE_ATTRIBUTES {
            let samples: Vec<Sample> = examples
                .iter()
                .enumerate()
                .map(|(idx, example)| (idx, self.preprocess(example.get(attribute))))
                .collect();

            let processed = reorder_batch(self.model.as_ref(), samples, self.options.batch_size)?;
            attribute_docs.insert(attribute, processed.into_iter().map(|(_, doc)| doc).collect());
        }

        Ok(attribute_docs)
    }

    /// Attaches `doc` under `attribute` unless it is the empty placeholder.
    pub fn apply_to_sample(sample: &mut Message, attribute: Attribute, doc: Doc) -> bool {
        if doc.is_empty() {
            return false;
        }
        sample.set_doc(attribute, doc);
        true
    }

    /// Attaches docs to every training example.
    pub fn train(&self, training_data: &mut TrainingData) -> Result<(), ModelError> {
        let mut attribute_docs = self.run_for_batch(&training_data.training_examples)?;

        for attribute in DENSE_FEATURIZABLE_ATTRIBUTES {
            let docs = attribute_docs.remove(&attribute).unwrap_or_default();
            let mut attached = 0usize;
            for (example, doc) in training_data.training_examples.iter_mut().zip(docs) {
                if Self::apply_to_sample(example, attribute, doc) {
                    attached += 1;
                }
            }
            debug!(%attribute, attached, total = training_data.len(), "Attached docs");
        }

        Ok(())
    }

    /// Doc for one text, bypassing batching.
    pub fn process_single(&self, text: &str) -> Result<Doc, ModelError> {
        self.model.doc(&self.preprocess(Some(text)))
    }

    /// Attaches docs to every non-empty dense attribute of `message`.
    pub fn process(&self, message: &mut Message) -> Result<(), ModelError> {
        for attribute in DENSE_FEATURIZABLE_ATTRIBUTES {
            let Some(text) = message.get(attribute).filter(|t| !t.is_empty()) else {
                continue;
            };
            let doc = self.process_single(text)?;
            message.set_doc(attribute, doc);
        }
        Ok(())
    }
}

/// `explicit` if non-empty, else `fallback_language`.
pub fn resolve_model_name(explicit: &str, fallback_language: &str) -> String {
    if explicit.is_empty() {
        fallback_language.to_string()
    } else {
        explicit.to_string()
    }
}

/// `"{component_name}-{model}"`, with the fallback language standing in for an
/// unset or empty model.
pub fn cache_key(
    component_name: &str,
    configured_model: Option<&str>,
    fallback_language: &str,
) -> String {
    let model = configured_model
        .filter(|m| !m.is_empty())
        .unwrap_or(fallback_language);
    format!("{component_name}-{model}")
}

/// `None` becomes `""`; text is lower-cased unless `case_sensitive`.
pub fn preprocess(text: Option<&str>, case_sensitive: bool) -> String {
    match text {
        None => String::new(),
        Some(text) if case_sensitive => text.to_string(),
        Some(text) => text.to_lowercase(),
    }
}
