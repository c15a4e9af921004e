//! Logging for the rainfall predictor
//!
//! This crate installs the global `tracing` subscriber: a stdout layer in the
//! configured format and, when a log directory is configured, a JSON layer
//! writing to daily-rotated files.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use common::error::{Error, Result};
use service_config::{LogFormat, LoggingSettings};

/// File name prefix of rotated log files
pub const LOG_FILE_PREFIX: &str = "rainfall-predictor.log";

/// Keeps the background log writer alive; dropping it flushes pending lines
#[must_use = "dropping the guard stops file logging"]
#[derive(Debug)]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Builds the event filter; `RUST_LOG` wins over the configured level
pub fn build_filter(level: &str) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => level_filter(level),
    }
}

fn level_filter(level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(level)
        .map_err(|e| Error::Config(format!("invalid log level '{}': {}", level, e)))
}

/// Installs the global subscriber
pub fn init(settings: &LoggingSettings) -> Result<LoggingGuard> {
    let filter = build_filter(&settings.level)?;

    let stdout_layer = match settings.format {
        LogFormat::Pretty => fmt::layer().with_target(true).boxed(),
        LogFormat::Json => fmt::layer().json().with_target(true).boxed(),
    };

    let (file_layer, file_guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install log subscriber: {}", e)))?;

    tracing::debug!(
        level = %settings.level,
        format = %settings.format,
        directory = ?settings.directory,
        "Logging initialized"
    );

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
