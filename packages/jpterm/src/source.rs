//! Loading the document to query.
//!
//! Exactly one source is used per run, picked in this order:
//!
//! 1. an explicit file,
//! 2. standard input, when it is not a terminal,
//! 3. a built-in sample document.
//!
//! When the document arrives through a pipe the interactive session still
//! needs a keyboard. After the pipe is drained, file descriptor 0 is
//! re-bound to the controlling terminal. That happens on every path out of
//! [`load_from_pipe`], including parse failures.

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::error::DocumentError;

/// Which source supplied the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Pipe,
    Sample,
}

/// The process's standard input, as seen by the resolver.
pub trait StdinSource {
    /// Whether standard input is an interactive terminal.
    fn is_terminal(&self) -> bool;

    /// Read standard input to end of stream.
    fn drain(&mut self) -> io::Result<Vec<u8>>;

    /// Point standard input back at the controlling terminal.
    fn rebind_terminal(&mut self) -> Result<(), DocumentError>;
}

/// Standard input of the running process.
#[derive(Debug, Default)]
pub struct ProcessStdin;

#[cfg(unix)]
const CONTROLLING_TERMINAL: &str = "/dev/tty";

impl StdinSource for ProcessStdin {
    fn is_terminal(&self) -> bool {
        io::stdin().is_terminal()
    }

    fn drain(&mut self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        io::stdin().lock().read_to_end(&mut bytes)?;
        Ok(bytes)
    }

    #[cfg(unix)]
    fn rebind_terminal(&mut self) -> Result<(), DocumentError> {
        use nix::fcntl::{open, OFlag};
        use nix::libc::STDIN_FILENO;
        use nix::sys::stat::Mode;
        use nix::unistd::{close, dup2};

        let terminal = |err: nix::Error| DocumentError::Terminal(io::Error::from(err));

        let tty = open(CONTROLLING_TERMINAL, OFlag::O_RDONLY, Mode::empty()).map_err(terminal)?;
        // dup2 closes the exhausted pipe on fd 0 before installing the tty.
        let bound = dup2(tty, STDIN_FILENO).map_err(terminal);
        close(tty).map_err(terminal)?;
        bound?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn rebind_terminal(&mut self) -> Result<(), DocumentError> {
        Err(DocumentError::Terminal(io::Error::new(
            io::ErrorKind::Unsupported,
            "re-binding standard input is only supported on unix",
        )))
    }
}

/// Holds standard input between the drain and the terminal re-bind.
///
/// [`StdinHandoff::release`] performs the re-bind and reports its result.
/// If the guard is dropped without being released, the re-bind still runs
/// and its error is logged.
pub struct StdinHandoff<'a, S: StdinSource> {
    stdin: &'a mut S,
    rebound: bool,
}

impl<'a, S: StdinSource> StdinHandoff<'a, S> {
    pub fn acquire(stdin: &'a mut S) -> Self {
        Self {
            stdin,
            rebound: false,
        }
    }

    pub fn drain(&mut self) -> io::Result<Vec<u8>> {
        self.stdin.drain()
    }

    pub fn release(mut self) -> Result<(), DocumentError> {
        self.rebound = true;
        self.stdin.rebind_terminal()
    }
}

impl<S: StdinSource> Drop for StdinHandoff<'_, S> {
    fn drop(&mut self) {
        if !self.rebound {
            self.rebound = true;
            if let Err(err) = self.stdin.rebind_terminal() {
                warn!(%err, "standard input left detached from the terminal");
            }
        }
    }
}

/// Load the document for this run.
pub fn load(path: Option<&Path>) -> Result<(JsonValue, Source), DocumentError> {
    load_with(path, &mut ProcessStdin)
}

/// Load the document, consulting `stdin` when no path is given.
pub fn load_with<S: StdinSource>(
    path: Option<&Path>,
    stdin: &mut S,
) -> Result<(JsonValue, Source), DocumentError> {
    if let Some(path) = path {
        let document = load_from_file(path)?;
        info!(path = %path.display(), "loaded document from file");
        return Ok((document, Source::File(path.to_path_buf())));
    }

    if !stdin.is_terminal() {
        let document = load_from_pipe(stdin)?;
        info!("loaded document from standard input");
        return Ok((document, Source::Pipe));
    }

    info!("no input given, using the sample document");
    Ok((sample_document(), Source::Sample))
}

pub fn load_from_file(path: &Path) -> Result<JsonValue, DocumentError> {
    let text = fs::read_to_string(path).map_err(|source| DocumentError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Drain `stdin`, re-bind the terminal, then parse what was read.
pub fn load_from_pipe<S: StdinSource>(stdin: &mut S) -> Result<JsonValue, DocumentError> {
    let mut handoff = StdinHandoff::acquire(stdin);
    let drained = handoff.drain();
    let rebound = handoff.release();

    let bytes = drained.map_err(DocumentError::Read)?;
    debug!(bytes = bytes.len(), "drained standard input");
    rebound?;
    debug!("standard input re-bound to the controlling terminal");

    Ok(serde_json::from_slice(&bytes)?)
}

/// A small document so the tool can be explored without any input.
pub fn sample_document() -> JsonValue {
    let mut c = serde_json::Map::new();
    c.insert("d".to_string(), JsonValue::from("baz"));
    c.insert("e".to_string(), JsonValue::from(vec![1, 2, 3]));

    let mut sample = serde_json::Map::new();
    sample.insert("a".to_string(), JsonValue::from("foo"));
    sample.insert("b".to_string(), JsonValue::from(2));
    sample.insert("c".to_string(), JsonValue::Object(c));
    sample.insert("d".to_string(), JsonValue::from(true));
    sample.insert("e".to_string(), JsonValue::Null);
    sample.insert("f".to_string(), JsonValue::from(1.1));
    JsonValue::Object(sample)
}
