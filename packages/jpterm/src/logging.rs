//! Logging infrastructure using `tracing` and `tracing-subscriber`.
//!
//! The terminal host owns the screen, so log output never goes to stdout or
//! stderr. Logging is enabled only when a log file is configured; events are
//! appended to it without ANSI colors.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Configuration for logging behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// File that receives log output.
    pub file: PathBuf,
    /// `EnvFilter` directive, e.g. `info` or `jpterm=debug`.
    pub filter: String,
}

/// Initialize the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened, the filter directive
/// does not parse, or a subscriber is already installed.
pub fn init(config: &LogConfig) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)?;
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|err| io::Error::other(err.to_string()))
}
