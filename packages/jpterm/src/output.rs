//! What gets printed when the session ends.

use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::debug;

use crate::error::OutputError;
use crate::format;

/// Which artifact is emitted at exit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputMode {
    /// The last successful result, serialized.
    #[default]
    Result,
    /// The last expression text.
    Expression,
    /// Nothing.
    Quiet,
}

impl OutputMode {
    /// All modes, in cycling order.
    pub const ALL: [OutputMode; 3] = [OutputMode::Result, OutputMode::Expression, OutputMode::Quiet];

    /// The mode after this one; wraps around.
    pub fn next(self) -> Self {
        match self {
            OutputMode::Result => OutputMode::Expression,
            OutputMode::Expression => OutputMode::Quiet,
            OutputMode::Quiet => OutputMode::Result,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Result => "result",
            OutputMode::Expression => "expression",
            OutputMode::Quiet => "quiet",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the final output goes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Destination {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Destination {
    pub fn from_path(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Destination::File(path.to_path_buf()),
            None => Destination::Stdout,
        }
    }
}

/// Choose the text to emit, if any.
pub fn select(
    mode: OutputMode,
    last_result: Option<&JsonValue>,
    last_expression: Option<&str>,
) -> Option<String> {
    match mode {
        OutputMode::Result => last_result.map(format::canonical),
        OutputMode::Expression => last_expression.map(str::to_string),
        OutputMode::Quiet => None,
    }
}

/// Write the session's final output.
///
/// When there is nothing to emit the destination is left untouched: an
/// existing output file is not truncated.
pub fn finalize(
    mode: OutputMode,
    last_result: Option<&JsonValue>,
    last_expression: Option<&str>,
    destination: &Destination,
) -> Result<(), OutputError> {
    let Some(text) = select(mode, last_result, last_expression) else {
        debug!(%mode, "nothing to emit");
        return Ok(());
    };

    match destination {
        Destination::Stdout => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_text(&mut handle, &text)
        }
        Destination::File(path) => {
            debug!(path = %path.display(), %mode, "writing final output");
            let mut file = File::create(path).map_err(|source| OutputError::Open {
                path: path.clone(),
                source,
            })?;
            write_text(&mut file, &text)
        }
    }
}

fn write_text(writer: &mut impl Write, text: &str) -> Result<(), OutputError> {
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    Ok(())
}
