//! End-to-end tests against on-disk models.

mod common;

use common::fixtures::{ModelFixture, VECTOR_WIDTH, WORDS, sample_messages};
use langmodel::{
    AdapterError, AdapterOptions, Attribute, ComponentCache, MokaComponentCache, ModelAdapter,
    ModelError, PipelineConfig, TrainingData,
};

#[test]
fn test_create_and_process_with_language_fallback() {
    let fixture = ModelFixture::new();
    fixture.model("en").build();

    let adapter = ModelAdapter::create(
        AdapterOptions::default(),
        &PipelineConfig::new("en"),
        &fixture.loader(),
    )
    .expect("model should load");

    assert_eq!(adapter.options().model.as_deref(), Some("en"));
    assert_eq!(adapter.cache_key(), "LanguageModelAdapter-en");

    let doc = adapter.process_single("Book a FLIGHT").unwrap();
    let ids: Vec<u32> = doc.tokens().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 5, 6]);
}

#[test]
fn test_missing_model_reports_remediation() {
    let fixture = ModelFixture::new();

    let err = ModelAdapter::create(
        AdapterOptions::default().with_model("en_core_web_md"),
        &PipelineConfig::new("en"),
        &fixture.loader(),
    )
    .unwrap_err();

    assert!(matches!(
        err,
        AdapterError::Model(ModelError::NotFound { .. })
    ));
    let msg = err.to_string();
    assert!(msg.contains("en_core_web_md"));
    assert!(msg.contains("Please download and/or link a model"));
}

#[test]
fn test_train_attaches_docs_in_order() {
    let fixture = ModelFixture::new();
    fixture.model("en").build();

    let adapter = ModelAdapter::create(
        AdapterOptions::default(),
        &PipelineConfig::default(),
        &fixture.loader(),
    )
    .unwrap();

    let mut data = TrainingData::new(sample_messages());
    adapter.train(&mut data).unwrap();

    let examples = &data.training_examples;
    assert_eq!(examples[0].doc(Attribute::Text).unwrap().text(), "hello there");
    assert!(examples[0].doc(Attribute::Response).is_none());

    assert!(examples[1].doc(Attribute::Text).is_none());
    assert_eq!(examples[1].doc(Attribute::Response).unwrap().text(), "hi");
    assert_eq!(
        examples[1].doc(Attribute::ActionText).unwrap().tokens()[0].id,
        WORDS.iter().position(|w| *w == "utter_greet").unwrap() as u32 + 1
    );

    assert!(examples[2].docs_by_key().next().is_none());
    assert_eq!(examples[3].doc(Attribute::Text).unwrap().len(), 5);
}

#[test]
fn test_training_and_inference_docs_agree() {
    let fixture = ModelFixture::new();
    fixture.model("en").with_vectors().build();

    let adapter = ModelAdapter::create(
        AdapterOptions::default(),
        &PipelineConfig::default(),
        &fixture.loader(),
    )
    .unwrap();

    let mut data = TrainingData::new(sample_messages());
    adapter.train(&mut data).unwrap();

    let mut message = sample_messages().remove(3);
    adapter.process(&mut message).unwrap();

    let trained = data.training_examples[3].doc(Attribute::Text).unwrap();
    let inferred = message.doc(Attribute::Text).unwrap();
    assert_eq!(trained, inferred);
    assert_eq!(inferred.vector().unwrap().len(), VECTOR_WIDTH);
    assert!((trained.similarity(inferred).unwrap() - 1.0).abs() < 1e-5);
}

#[test]
fn test_case_sensitive_option_reaches_model() {
    let fixture = ModelFixture::new();
    fixture.model("en").build();

    let adapter = ModelAdapter::create(
        AdapterOptions::default().case_sensitive(true),
        &PipelineConfig::default(),
        &fixture.loader(),
    )
    .unwrap();

    // "Hello" is not in the lower-case vocabulary
    let doc = adapter.process_single("Hello").unwrap();
    assert_eq!(doc.tokens()[0].id, 0);
    assert_eq!(doc.tokens()[0].text, "Hello");
}

#[test]
fn test_model_by_explicit_path() {
    let fixture = ModelFixture::new();
    let dir = fixture.model("custom").lang("de").build();

    let adapter = ModelAdapter::create(
        AdapterOptions::default().with_model(dir.to_str().unwrap()),
        &PipelineConfig::new("en"),
        &fixture.loader(),
    )
    .unwrap();

    assert_eq!(adapter.model().lang(), "de");
}

#[test]
fn test_component_cache_reuses_adapter() {
    let fixture = ModelFixture::new();
    fixture.model("en").build();
    let loader = fixture.loader();
    let cache = MokaComponentCache::with_capacity(2);

    let first = ModelAdapter::load_cached(
        &cache,
        AdapterOptions::default(),
        &PipelineConfig::default(),
        &loader,
    )
    .unwrap();

    // Remove the model from disk: a second load can only succeed through the cache.
    std::fs::remove_dir_all(fixture.data_path().join("en")).unwrap();

    let second = ModelAdapter::load_cached(
        &cache,
        AdapterOptions::default(),
        &PipelineConfig::default(),
        &loader,
    )
    .unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
    assert!(cache.get("LanguageModelAdapter-en").is_some());
}
