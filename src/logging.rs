//! `tracing` subscriber setup: stderr plus an optional log file.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `level`. The log file is truncated at
/// start, as each run's log stands on its own.
///
/// # Errors
///
/// Returns an error if the log file cannot be created or a subscriber is
/// already installed.
pub fn init(level: &str, log_file: Option<&Path>) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| format!("Invalid log level {level:?}: {e}"))?;

    let file_layer = log_file
        .map(|path| {
            File::create(path)
                .map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)).boxed())
                .map_err(|e| format!("Failed to create log file {}: {e}", path.display()))
        })
        .transpose()?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| format!("Failed to install logger: {e}"))
}
