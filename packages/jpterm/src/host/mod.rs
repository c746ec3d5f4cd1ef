//! Host implementations for the live session.
//!
//! The terminal host paints the panes with crossterm and turns key presses
//! into session events.

pub mod field;
pub mod terminal;

pub use terminal::TerminalHost;
