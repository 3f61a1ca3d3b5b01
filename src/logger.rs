//! Logging initialisation via tracing-subscriber.
//!
//! Call [`init`] once at startup.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
#[error("logger error: {0}")]
pub struct LoggerError(String);

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when it is set and valid; otherwise `level` is used.
pub fn init(level: &str) -> Result<(), LoggerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| LoggerError(format!("invalid log level '{level}': {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| LoggerError(format!("failed to set subscriber: {e}")))
}

/// Check a `--log-level` value: `off`, `error`, `warn`, `info`, `debug` or
/// `trace`, in any case.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    match level.trim() {
        "" => Err(LoggerError("log level must not be empty".into())),
        text => text.parse::<LevelFilter>().map_err(|_| {
            LoggerError(format!(
                "expected off, error, warn, info, debug or trace, got '{level}'"
            ))
        }),
    }
}
