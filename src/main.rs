//! `langmodel` entrypoint.
//!
//! Reads one JSON message per stdin line, attaches docs, writes one JSON
//! message per stdout line. `--check` only loads and validates the model and
//! prints its cache key.
//!
//! Exits with status 2 when the configured model is missing or unusable.

use std::io::{self, BufWriter};

use langmodel::{Config, DirectoryLoader, ModelAdapter, ModelError, process_lines};

const EXIT_MODEL_UNUSABLE: i32 = 2;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let config = Config::from_env()?;
    config.validate()?;

    tracing::info!(
        language = %config.language,
        model = config.model.as_deref().unwrap_or("-"),
        data_path = %config.data_path.display(),
        "langmodel starting"
    );

    let loader = DirectoryLoader::new(config.data_path.clone())?;
    let adapter = match ModelAdapter::create(config.adapter_options(), &config.pipeline(), &loader)
    {
        Ok(adapter) => adapter,
        Err(err) if err.model_error().is_some_and(ModelError::is_model_unusable) => {
            tracing::error!(data_path = %config.data_path.display(), "Language model unusable");
            eprintln!("{err}");
            std::process::exit(EXIT_MODEL_UNUSABLE);
        }
        Err(err) => return Err(err.into()),
    };

    if std::env::args().any(|arg| arg == "--check") {
        println!("{}", adapter.cache_key());
        return Ok(());
    }

    let stdin = io::stdin();
    let processed = process_lines(&adapter, stdin.lock(), BufWriter::new(io::stdout().lock()))?;

    tracing::info!(processed, "langmodel finished");
    Ok(())
}
