//! Platform-independent session core.
//!
//! This module contains the live evaluation loop. It talks to the user only
//! through the `IoHost` trait, so the same core runs against the terminal and
//! against the scripted test host.
//!
//! Every edit re-evaluates the expression against the document. What the
//! result pane shows only ever moves forward to another successful, non-null
//! result; failures and null results leave it alone.

use reedline::StyledText;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::highlighter::JsonHighlighter;
use crate::io::{Event, ExitReason, IoError, IoHost, Signal};
use crate::output::OutputMode;
use crate::query::{JmesPathEngine, Outcome, QueryEngine};

/// Status shown after an evaluation updated the result pane.
pub const STATUS_SUCCESS: &str = "success";

/// Whether an expression is currently entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The expression field is empty.
    Idle,
    /// The expression field holds text.
    Evaluated,
}

/// What the session hands to the output finalizer at exit.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub output_mode: OutputMode,
    pub last_result: Option<JsonValue>,
    pub last_expression: Option<String>,
}

/// The live session controller.
pub struct SessionCore<E: QueryEngine = JmesPathEngine> {
    document: JsonValue,
    engine: E,
    highlighter: JsonHighlighter,
    state: SessionState,
    last_result: Option<JsonValue>,
    last_expression: Option<String>,
    output_mode: OutputMode,
    status: String,
    displayed: bool,
}

impl SessionCore<JmesPathEngine> {
    /// Create a session over `document` using JMESPath.
    pub fn new(document: JsonValue, output_mode: OutputMode) -> Self {
        let engine = JmesPathEngine::for_document(&document);
        Self::with_engine(document, output_mode, engine)
    }
}

impl<E: QueryEngine> SessionCore<E> {
    /// Create a session with a specific query engine.
    pub fn with_engine(document: JsonValue, output_mode: OutputMode, engine: E) -> Self {
        Self {
            document,
            engine,
            highlighter: JsonHighlighter::new(),
            state: SessionState::Idle,
            last_result: None,
            last_expression: None,
            output_mode,
            status: String::new(),
            displayed: false,
        }
    }

    /// Run the session loop until the user exits.
    ///
    /// Interrupts end the loop like the exit key does.
    pub fn run(&mut self, io: &mut impl IoHost) -> Result<ExitReason, IoError> {
        io.show_document(&self.highlighter.render(&self.document))?;
        io.show_result(None)?;
        io.show_status(&self.status)?;
        io.flush()?;

        loop {
            io.wait_for_input()?;

            if let Some(signal) = io.read_signal()? {
                let reason = match signal {
                    Signal::Interrupt => ExitReason::Interrupt,
                    Signal::Eof => ExitReason::Eof,
                };
                info!(?reason, "session ended");
                return Ok(reason);
            }

            let event = match io.read_event()? {
                Some(event) => event,
                None => continue,
            };

            if event == Event::Exit {
                info!(reason = ?ExitReason::UserExit, "session ended");
                return Ok(ExitReason::UserExit);
            }

            self.handle_event(event, io)?;
            io.flush()?;
        }
    }

    /// Apply one event. `Event::Exit` is a no-op here; `run` handles it.
    pub fn handle_event(&mut self, event: Event, io: &mut impl IoHost) -> Result<(), IoError> {
        match event {
            Event::Edit(text) => self.on_edit(text, io),
            Event::Clear => self.clear(io),
            Event::CycleOutputMode => self.cycle_output_mode(io),
            Event::Exit => Ok(()),
        }
    }

    fn on_edit(&mut self, text: String, io: &mut impl IoHost) -> Result<(), IoError> {
        if text.is_empty() {
            self.state = SessionState::Idle;
            return self.clear_display(io);
        }

        self.state = SessionState::Evaluated;
        let outcome = self.engine.evaluate(&text, &self.document);
        self.last_expression = Some(text);

        match outcome {
            Outcome::Success(JsonValue::Null) => {
                debug!("expression evaluated to null, keeping the current result");
            }
            Outcome::Success(value) => {
                let rendered = self.highlighter.render(&value);
                self.last_result = Some(value);
                self.show(&rendered, io)?;
                self.set_status(STATUS_SUCCESS, io)?;
            }
            Outcome::Failure => {}
        }
        Ok(())
    }

    fn clear(&mut self, io: &mut impl IoHost) -> Result<(), IoError> {
        io.reset_input()?;
        self.state = SessionState::Idle;
        self.clear_display(io)
    }

    fn cycle_output_mode(&mut self, io: &mut impl IoHost) -> Result<(), IoError> {
        self.output_mode = self.output_mode.next();
        info!(mode = %self.output_mode, "output mode changed");
        let status = format!("output mode set to {}", self.output_mode);
        self.set_status(&status, io)
    }

    fn show(&mut self, rendered: &StyledText, io: &mut impl IoHost) -> Result<(), IoError> {
        self.displayed = true;
        io.show_result(Some(rendered))
    }

    fn clear_display(&mut self, io: &mut impl IoHost) -> Result<(), IoError> {
        self.displayed = false;
        io.show_result(None)
    }

    fn set_status(&mut self, status: &str, io: &mut impl IoHost) -> Result<(), IoError> {
        self.status = status.to_string();
        io.show_status(status)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn last_result(&self) -> Option<&JsonValue> {
        self.last_result.as_ref()
    }

    pub fn last_expression(&self) -> Option<&str> {
        self.last_expression.as_deref()
    }

    pub fn output_mode(&self) -> OutputMode {
        self.output_mode
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    /// Whether the result pane currently shows a result.
    pub fn is_displaying(&self) -> bool {
        self.displayed
    }

    /// Consume the session, keeping what the finalizer needs.
    pub fn into_summary(self) -> SessionSummary {
        SessionSummary {
            output_mode: self.output_mode,
            last_result: self.last_result,
            last_expression: self.last_expression,
        }
    }
}
