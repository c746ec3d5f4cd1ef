//! Test host implementation for in-memory I/O testing.
//!
//! Replays a scripted sequence of events and signals and records every pane
//! and status update, so the session loop can be tested without a terminal.

use std::collections::VecDeque;

use nu_ansi_term::Style;
use reedline::StyledText;

use super::{Event, IoError, IoHost, Signal};
use crate::highlighter::plain_text;

#[derive(Debug, Clone)]
enum Scripted {
    Event(Event),
    Signal(Signal),
    Failure(String),
}

/// Test host with in-memory I/O buffers.
///
/// Inputs are consumed in the order they were queued. Once the script runs
/// out the host reports [`Signal::Eof`].
#[derive(Debug, Default)]
pub struct TestHost {
    script: VecDeque<Scripted>,
    pending_event: Option<Event>,
    pending_signal: Option<Signal>,
    /// Plain text passed to every `show_result()` call (`None` = cleared).
    results: Vec<Option<String>>,
    /// Styled fragments of the most recent non-empty result.
    last_styled: Option<Vec<(Style, String)>>,
    /// Every status message shown.
    statuses: Vec<String>,
    /// Plain text of the input pane.
    document: Option<String>,
    /// Number of times the input field was reset.
    input_resets: usize,
    /// Number of times `flush()` was called.
    flush_count: usize,
}

impl TestHost {
    /// Create a new empty test host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event.
    pub fn queue_event(&mut self, event: Event) {
        self.script.push_back(Scripted::Event(event));
    }

    /// Queue one edit event per text, as if typed keystroke by keystroke.
    pub fn queue_edits(&mut self, texts: impl IntoIterator<Item = impl Into<String>>) {
        for text in texts {
            self.queue_event(Event::Edit(text.into()));
        }
    }

    /// Queue the edit events produced by typing `text` one character at a time.
    pub fn queue_typing(&mut self, text: &str) {
        let mut typed = String::new();
        for c in text.chars() {
            typed.push(c);
            self.queue_event(Event::Edit(typed.clone()));
        }
    }

    /// Queue a signal.
    pub fn queue_signal(&mut self, signal: Signal) {
        self.script.push_back(Scripted::Signal(signal));
    }

    /// Queue a host failure: `wait_for_input` returns an error at this point.
    pub fn queue_failure(&mut self, message: &str) {
        self.script.push_back(Scripted::Failure(message.to_string()));
    }

    /// All result pane updates, oldest first.
    pub fn results(&self) -> &[Option<String>] {
        &self.results
    }

    /// What the result pane currently shows.
    pub fn displayed(&self) -> Option<&str> {
        self.results.last().and_then(|r| r.as_deref())
    }

    /// Styled fragments of the most recent non-empty result.
    pub fn last_styled(&self) -> Option<&[(Style, String)]> {
        self.last_styled.as_deref()
    }

    /// All status messages, oldest first.
    pub fn statuses(&self) -> &[String] {
        &self.statuses
    }

    /// The current status message, if any was shown.
    pub fn status(&self) -> Option<&str> {
        self.statuses.last().map(String::as_str)
    }

    /// Plain text of the input pane.
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn input_resets(&self) -> usize {
        self.input_resets
    }

    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// Check if there is unconsumed script.
    pub fn has_pending_input(&self) -> bool {
        !self.script.is_empty()
    }
}

impl IoHost for TestHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        match self.script.pop_front() {
            Some(Scripted::Event(event)) => self.pending_event = Some(event),
            Some(Scripted::Signal(signal)) => self.pending_signal = Some(signal),
            Some(Scripted::Failure(message)) => return Err(IoError::Io(message)),
            None => self.pending_signal = Some(Signal::Eof),
        }
        Ok(())
    }

    fn read_event(&mut self) -> Result<Option<Event>, IoError> {
        Ok(self.pending_event.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn show_document(&mut self, rendered: &StyledText) -> Result<(), IoError> {
        self.document = Some(plain_text(rendered));
        Ok(())
    }

    fn show_result(&mut self, rendered: Option<&StyledText>) -> Result<(), IoError> {
        self.results.push(rendered.map(plain_text));
        if let Some(rendered) = rendered {
            self.last_styled = Some(rendered.buffer.clone());
        }
        Ok(())
    }

    fn show_status(&mut self, status: &str) -> Result<(), IoError> {
        self.statuses.push(status.to_string());
        Ok(())
    }

    fn reset_input(&mut self) -> Result<(), IoError> {
        self.input_resets += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.flush_count += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_creates_empty_host() {
        let host = TestHost::new();
        assert!(!host.has_pending_input());
        assert!(host.results().is_empty());
        assert!(host.statuses().is_empty());
        assert_eq!(host.input_resets(), 0);
        assert_eq!(host.flush_count(), 0);
    }

    #[test]
    fn script_is_replayed_in_order() {
        let mut host = TestHost::new();
        host.queue_event(Event::Edit("a".to_string()));
        host.queue_signal(Signal::Interrupt);
        host.queue_event(Event::Exit);

        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), None);
        assert_eq!(host.read_event().unwrap(), Some(Event::Edit("a".to_string())));

        host.wait_for_input().unwrap();
        assert_eq!(host.read_event().unwrap(), None);
        assert_eq!(host.read_signal().unwrap(), Some(Signal::Interrupt));

        host.wait_for_input().unwrap();
        assert_eq!(host.read_event().unwrap(), Some(Event::Exit));
    }

    #[test]
    fn exhausted_script_reports_eof() {
        let mut host = TestHost::new();
        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), Some(Signal::Eof));
    }

    #[test]
    fn queued_failure_is_returned_once() {
        let mut host = TestHost::new();
        host.queue_failure("terminal gone");

        let err = host.wait_for_input().unwrap_err();
        assert_eq!(err.to_string(), "I/O error: terminal gone");

        host.wait_for_input().unwrap();
        assert_eq!(host.read_signal().unwrap(), Some(Signal::Eof));
    }

    #[test]
    fn queue_typing_emits_each_prefix() {
        let mut host = TestHost::new();
        host.queue_typing("ab");

        let mut seen = Vec::new();
        while host.has_pending_input() {
            host.wait_for_input().unwrap();
            seen.push(host.read_event().unwrap());
        }
        assert_eq!(
            seen,
            vec![
                Some(Event::Edit("a".to_string())),
                Some(Event::Edit("ab".to_string())),
            ]
        );
    }

    #[test]
    fn show_result_records_text_and_clears() {
        let mut host = TestHost::new();
        let mut styled = StyledText::new();
        styled.push((Style::new(), "1".to_string()));

        host.show_result(Some(&styled)).unwrap();
        assert_eq!(host.displayed(), Some("1"));

        host.show_result(None).unwrap();
        assert_eq!(host.displayed(), None);
        assert_eq!(host.results().len(), 2);
        assert_eq!(host.last_styled().unwrap().len(), 1);
    }

    #[test]
    fn status_and_resets_are_recorded() {
        let mut host = TestHost::new();
        host.show_status("success").unwrap();
        host.reset_input().unwrap();
        host.flush().unwrap();

        assert_eq!(host.status(), Some("success"));
        assert_eq!(host.input_resets(), 1);
        assert_eq!(host.flush_count(), 1);
    }
}
