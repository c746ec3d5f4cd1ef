//! # jpterm
//!
//! An interactive terminal for exploring JSON documents with JMESPath.
//!
//! The expression is re-evaluated on every keystroke and the result is shown,
//! colorized, next to the input document. When the session ends, the last
//! result, the last expression, or nothing is printed, depending on the
//! output mode.
//!
//! ## Usage
//!
//! ```bash
//! # Explore a file
//! jpterm data.json
//!
//! # Explore piped input, keep the expression for later
//! curl -s https://api.example.com/items | jpterm -m expression
//!
//! # No input: a sample document is loaded
//! jpterm
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod logging;
pub mod output;
pub mod query;
pub mod source;

pub use config::Config;
pub use error::{DocumentError, Error, OutputError};

use tracing::{info, warn};

use crate::core::SessionCore;
use crate::host::TerminalHost;
use crate::io::{ExitReason, IoError};
use crate::output::Destination;
use crate::query::QueryEngine;

/// Load the document, run the interactive session, then emit the output.
pub fn run(config: &Config) -> Result<(), Error> {
    let (document, source) = source::load(config.input.as_deref())?;
    info!(?source, mode = %config.output_mode, "starting session");

    let mut session = SessionCore::new(document, config.output_mode);
    let outcome = {
        let mut host = TerminalHost::new().map_err(IoError::from)?;
        session.run(&mut host)
    };

    conclude(session, outcome, &config.destination())
}

/// Emit the final output, then report how the loop ended.
///
/// A host failure still ends the session: whatever was captured up to that
/// point is written before the failure is returned.
fn conclude<E: QueryEngine>(
    session: SessionCore<E>,
    outcome: Result<ExitReason, IoError>,
    destination: &Destination,
) -> Result<(), Error> {
    if let Err(err) = &outcome {
        warn!(%err, "session loop failed");
    }

    let summary = session.into_summary();
    output::finalize(
        summary.output_mode,
        summary.last_result.as_ref(),
        summary.last_expression.as_deref(),
        destination,
    )?;
    outcome?;
    Ok(())
}
