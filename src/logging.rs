// src/logging.rs
use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// JSON lines to the log file, plus a readable console layer when asked for.
/// Calling it again after a subscriber is installed does nothing.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let file_layer = match &config.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            Some(
                fmt::layer()
                    .json()
                    .with_writer(Mutex::new(file))
                    .with_current_span(false)
                    .with_span_list(false)
                    .boxed(),
            )
        }
        None => None,
    };

    let console_layer = config
        .console
        .then(|| fmt::layer().with_writer(std::io::stderr).boxed());

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(filter)
        .try_init();

    Ok(())
}
