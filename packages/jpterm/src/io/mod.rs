//! I/O abstraction for the live session.
//!
//! This module defines the interface between the session core and its host
//! environment. The core only talks to an `IoHost`: the terminal host paints
//! panes and turns keystrokes into events, the test host replays a script.

pub mod types;

#[cfg(test)]
pub mod test_host;

pub use types::*;

#[cfg(test)]
pub use test_host::TestHost;

use reedline::StyledText;

/// Error type for I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IoError {
    fn from(err: std::io::Error) -> Self {
        IoError::Io(err.to_string())
    }
}

/// Host interface for the live session.
///
/// The core calls these methods to receive user input and to update what the
/// user sees. Hosts own layout and painting; the core only says what goes
/// into each pane.
pub trait IoHost {
    /// Block until the user does something.
    ///
    /// After this returns, `read_event()` or `read_signal()` yields it.
    fn wait_for_input(&mut self) -> Result<(), IoError>;

    /// Take the pending event, if any.
    fn read_event(&mut self) -> Result<Option<Event>, IoError>;

    /// Take the pending signal (interrupt, end of input), if any.
    fn read_signal(&mut self) -> Result<Option<Signal>, IoError>;

    /// Show the loaded document in the input pane.
    fn show_document(&mut self, rendered: &StyledText) -> Result<(), IoError>;

    /// Replace the result pane. `None` clears it.
    fn show_result(&mut self, rendered: Option<&StyledText>) -> Result<(), IoError>;

    /// Replace the status line message.
    fn show_status(&mut self, status: &str) -> Result<(), IoError>;

    /// Empty the expression input field.
    fn reset_input(&mut self) -> Result<(), IoError>;

    /// Flush any buffered output.
    fn flush(&mut self) -> Result<(), IoError> {
        Ok(())
    }
}
