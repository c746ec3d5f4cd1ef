//! Error types for jpterm.
//!
//! Only two failures are fatal: the input document cannot be loaded, or the
//! final output cannot be written. Expressions that fail to evaluate are not
//! errors at all; see [`crate::query::Outcome`].

use std::io;
use std::path::PathBuf;

use crate::io::IoError;

/// The input document could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot read standard input: {0}")]
    Read(#[source] io::Error),

    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    #[error("cannot reattach the controlling terminal: {0}")]
    Terminal(#[source] io::Error),
}

/// The final output could not be written.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write failed: {0}")]
    Write(#[from] io::Error),
}

/// Top-level error returned by [`crate::run`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unable to load the input JSON: {0}")]
    Document(#[from] DocumentError),

    #[error("Unable to write output: {0}")]
    Output(#[from] OutputError),

    #[error("Terminal error: {0}")]
    Io(#[from] IoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_error_wraps_parse_failure() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(DocumentError::from(parse));
        assert!(err.to_string().starts_with("Unable to load the input JSON: "));
    }

    #[test]
    fn open_error_names_the_path() {
        let err = OutputError::Open {
            path: PathBuf::from("/nowhere/out.json"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "cannot open /nowhere/out.json: missing");
    }
}
