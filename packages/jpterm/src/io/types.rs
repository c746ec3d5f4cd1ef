//! I/O types for the live session.
//!
//! These types define the interface between the session core and its host.

/// A user action the session reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The expression field now holds this text.
    Edit(String),
    /// Empty the expression field.
    Clear,
    /// Advance to the next output mode.
    CycleOutputMode,
    /// Leave the session.
    Exit,
}

/// A signal from the host (Ctrl+C, end of input).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// User pressed Ctrl+C.
    Interrupt,
    /// The host has no more input to give.
    Eof,
}

/// Reason the session ended. All of them are normal exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitReason {
    /// User pressed the exit key.
    UserExit,
    /// User pressed Ctrl+C.
    Interrupt,
    /// Input ran out.
    Eof,
}
