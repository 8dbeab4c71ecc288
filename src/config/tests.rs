use super::*;
use serial_test::serial;
use std::env;
use std::path::PathBuf;

fn with_env_vars<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, value) in vars {
        unsafe { env::set_var(key, value) };
    }

    let result = f();

    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    for (key, _) in vars {
        unsafe { env::remove_var(key) };
    }

    result
}

fn clear_langmodel_env() {
    // SAFETY: Test code only, we accept the thread-safety risk in tests.
    unsafe {
        env::remove_var("LANGMODEL_LANGUAGE");
        env::remove_var("LANGMODEL_MODEL");
        env::remove_var("LANGMODEL_CASE_SENSITIVE");
        env::remove_var("LANGMODEL_DATA_PATH");
        env::remove_var("LANGMODEL_BATCH_SIZE");
        env::remove_var("LANGMODEL_CACHE_CAPACITY");
    }
}

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.language, "en");
    assert!(config.model.is_none());
    assert!(!config.case_sensitive);
    assert_eq!(config.data_path, PathBuf::from("./models"));
    assert_eq!(config.batch_size, 50);
    assert_eq!(config.cache_capacity, 16);
}

#[test]
#[serial]
fn test_from_env_with_defaults() {
    clear_langmodel_env();

    let config = Config::from_env().expect("should parse with defaults");
    assert_eq!(config.language, "en");
    assert!(config.model.is_none());
    assert_eq!(config.batch_size, 50);
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_langmodel_env();

    let config = with_env_vars(
        &[
            ("LANGMODEL_LANGUAGE", "de"),
            ("LANGMODEL_MODEL", "de_core_news_sm"),
            ("LANGMODEL_CASE_SENSITIVE", "true"),
            ("LANGMODEL_DATA_PATH", "/opt/models"),
            ("LANGMODEL_BATCH_SIZE", "8"),
            ("LANGMODEL_CACHE_CAPACITY", "2"),
        ],
        Config::from_env,
    )
    .expect("should parse overrides");

    assert_eq!(config.language, "de");
    assert_eq!(config.model.as_deref(), Some("de_core_news_sm"));
    assert!(config.case_sensitive);
    assert_eq!(config.data_path, PathBuf::from("/opt/models"));
    assert_eq!(config.batch_size, 8);
    assert_eq!(config.cache_capacity, 2);
}

#[test]
#[serial]
fn test_from_env_blank_model_is_unset() {
    clear_langmodel_env();

    let config = with_env_vars(&[("LANGMODEL_MODEL", "   ")], Config::from_env).unwrap();
    assert!(config.model.is_none());
}

#[test]
#[serial]
fn test_from_env_invalid_bool() {
    clear_langmodel_env();

    let result = with_env_vars(&[("LANGMODEL_CASE_SENSITIVE", "maybe")], Config::from_env);
    assert!(matches!(result, Err(ConfigError::InvalidBool { .. })));
}

#[test]
#[serial]
fn test_from_env_invalid_batch_size() {
    clear_langmodel_env();

    let result = with_env_vars(&[("LANGMODEL_BATCH_SIZE", "lots")], Config::from_env);
    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    assert!(err.to_string().contains("LANGMODEL_BATCH_SIZE"));
}

#[test]
fn test_validate_zero_batch_size() {
    let config = Config {
        batch_size: 0,
        ..Default::default()
    };
    assert!(matches!(config.validate(), Err(ConfigError::ZeroBatchSize)));
}

#[test]
fn test_validate_missing_language() {
    let config = Config {
        language: String::new(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::MissingLanguage)
    ));

    let config = Config {
        language: String::new(),
        model: Some("/models/en".to_string()),
        ..Default::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_validate_data_path_is_file() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = Config {
        data_path: file.path().to_path_buf(),
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NotADirectory { .. })
    ));
}

#[test]
fn test_adapter_options_and_pipeline() {
    let config = Config {
        language: "fr".to_string(),
        model: Some("fr_core_news_md".to_string()),
        case_sensitive: true,
        batch_size: 10,
        ..Default::default()
    };

    assert_eq!(config.pipeline(), PipelineConfig::new("fr"));

    let options = config.adapter_options();
    assert_eq!(options.model.as_deref(), Some("fr_core_news_md"));
    assert!(options.case_sensitive);
    assert_eq!(options.batch_size, 10);
}
