//! Utilities for logging.

use tracing::Level;
use tracing_subscriber::filter::EnvFilter;

/// Output format for log records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    HumanReadable,
    Json,
}

/// Install the global tracing subscriber.
///
/// `default_level` applies when `RUST_LOG` is unset. Records go to stderr
/// so command output on stdout stays machine-readable.
pub fn configure_global_logger(default_level: Level, format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // Ignore the error from double initialization, tests may call this
    // multiple times.
    let _ = match format {
        LogFormat::Json => subscriber.json().try_init(),
        LogFormat::HumanReadable => subscriber.try_init(),
    };
}
