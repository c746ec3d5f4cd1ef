//! Session configuration.
//!
//! Resolved once at startup from the command line and the environment.

use std::path::PathBuf;

use crate::output::{Destination, OutputMode};

/// Environment variable holding the log filter directive.
pub const LOG_FILTER_ENV: &str = "JPTERM_LOG";

/// Filter used when logging is enabled but `JPTERM_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Everything a run needs to know.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Document to load; `None` means standard input or the sample.
    pub input: Option<PathBuf>,
    /// Output mode the session starts in.
    pub output_mode: OutputMode,
    /// Where the final output goes; `None` means standard output.
    pub output_file: Option<PathBuf>,
    /// Diagnostic log file; logging is off when `None`.
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn destination(&self) -> Destination {
        Destination::from_path(self.output_file.as_deref())
    }

    /// The log filter directive from the environment, or the default.
    pub fn log_filter(&self) -> String {
        log_filter_from(std::env::var(LOG_FILTER_ENV).ok())
    }
}

fn log_filter_from(value: Option<String>) -> String {
    match value {
        Some(directive) if !directive.trim().is_empty() => directive,
        _ => DEFAULT_LOG_FILTER.to_string(),
    }
}
