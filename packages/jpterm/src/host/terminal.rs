//! Full-screen terminal host using ratatui.
//!
//! Layout, top to bottom: title, expression field, the input and result
//! panes side by side, status line. ratatui owns raw mode, the alternate
//! screen and the frame diffing; crossterm supplies the key events. Keys:
//!
//! - `F5`: exit
//! - `Ctrl+]`: clear the expression
//! - `Ctrl+P`: cycle the output mode
//! - `Ctrl+C`: interrupt (exits)
//! - `PageUp` / `PageDown`: scroll the result pane

use std::io;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Paragraph};
use ratatui::{DefaultTerminal, Frame};
use reedline::StyledText;

use super::field::ExpressionField;
use crate::io::{Event, IoError, IoHost, Signal};

const TITLE: &str = "JMESPath Terminal";
const PROMPT: &str = "JMESPath Expression: ";
const INPUT_TITLE: &str = "Input JSON";
const RESULT_TITLE: &str = "JMESPath Result";
const STATUS_PREFIX: &str = "Status: ";

/// What a key press means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Exit,
    Clear,
    CycleOutputMode,
    Interrupt,
    Insert(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ScrollUp,
    ScrollDown,
    Ignore,
}

/// Map a key press to its action.
pub fn key_action(key: &KeyEvent) -> KeyAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::F(5) => KeyAction::Exit,
        // Legacy terminals report Ctrl+] as Ctrl+5.
        KeyCode::Char(']') | KeyCode::Char('5') if ctrl => KeyAction::Clear,
        KeyCode::Char('p') if ctrl => KeyAction::CycleOutputMode,
        KeyCode::Char('c') if ctrl => KeyAction::Interrupt,
        KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => KeyAction::Ignore,
        KeyCode::Char(c) => KeyAction::Insert(c),
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Delete => KeyAction::Delete,
        KeyCode::Left => KeyAction::Left,
        KeyCode::Right => KeyAction::Right,
        KeyCode::Home => KeyAction::Home,
        KeyCode::End => KeyAction::End,
        KeyCode::PageUp => KeyAction::ScrollUp,
        KeyCode::PageDown => KeyAction::ScrollDown,
        _ => KeyAction::Ignore,
    }
}

/// Terminal host. The terminal is restored when the host is dropped.
pub struct TerminalHost {
    terminal: DefaultTerminal,
    field: ExpressionField,
    document: Text<'static>,
    result: Text<'static>,
    status: String,
    result_scroll: u16,
    /// Inner height of the result pane at the last draw.
    page_height: u16,
    pending_event: Option<Event>,
    pending_signal: Option<Signal>,
}

impl TerminalHost {
    /// Take over the terminal.
    pub fn new() -> io::Result<Self> {
        let terminal = ratatui::try_init()?;
        Ok(Self {
            terminal,
            field: ExpressionField::new(),
            document: Text::default(),
            result: Text::default(),
            status: String::new(),
            result_scroll: 0,
            page_height: 1,
            pending_event: None,
            pending_signal: None,
        })
    }

    /// Apply a key press. Returns whether it produced an event or signal.
    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let edited = match key_action(key) {
            KeyAction::Exit => {
                self.pending_event = Some(Event::Exit);
                false
            }
            KeyAction::Clear => {
                self.pending_event = Some(Event::Clear);
                false
            }
            KeyAction::CycleOutputMode => {
                self.pending_event = Some(Event::CycleOutputMode);
                false
            }
            KeyAction::Interrupt => {
                self.pending_signal = Some(Signal::Interrupt);
                false
            }
            KeyAction::Insert(c) => {
                self.field.insert(c);
                true
            }
            KeyAction::Backspace => self.field.backspace(),
            KeyAction::Delete => self.field.delete(),
            KeyAction::Left => {
                self.field.move_left();
                false
            }
            KeyAction::Right => {
                self.field.move_right();
                false
            }
            KeyAction::Home => {
                self.field.move_to_start();
                false
            }
            KeyAction::End => {
                self.field.move_to_end();
                false
            }
            KeyAction::ScrollUp => {
                self.result_scroll = self.result_scroll.saturating_sub(self.page_height);
                false
            }
            KeyAction::ScrollDown => {
                let last = u16::try_from(self.result.lines.len().saturating_sub(1)).unwrap_or(u16::MAX);
                self.result_scroll = self.result_scroll.saturating_add(self.page_height).min(last);
                false
            }
            KeyAction::Ignore => false,
        };

        if edited {
            self.pending_event = Some(Event::Edit(self.field.text().to_string()));
        }
        self.pending_event.is_some() || self.pending_signal.is_some()
    }

    fn draw(&mut self) -> io::Result<()> {
        let screen = Screen {
            field: &self.field,
            document: &self.document,
            result: &self.result,
            status: &self.status,
            result_scroll: self.result_scroll,
        };
        let mut page_height = self.page_height;
        self.terminal.draw(|frame| page_height = screen.render(frame))?;
        self.page_height = page_height.max(1);
        Ok(())
    }
}

impl IoHost for TerminalHost {
    fn wait_for_input(&mut self) -> Result<(), IoError> {
        loop {
            match event::read()? {
                TermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    if self.handle_key(&key) {
                        return Ok(());
                    }
                    // Cursor movement and scrolling never reach the core.
                    self.draw()?;
                }
                TermEvent::Resize(..) => self.draw()?,
                _ => {}
            }
        }
    }

    fn read_event(&mut self) -> Result<Option<Event>, IoError> {
        Ok(self.pending_event.take())
    }

    fn read_signal(&mut self) -> Result<Option<Signal>, IoError> {
        Ok(self.pending_signal.take())
    }

    fn show_document(&mut self, rendered: &StyledText) -> Result<(), IoError> {
        self.document = to_text(rendered);
        Ok(())
    }

    fn show_result(&mut self, rendered: Option<&StyledText>) -> Result<(), IoError> {
        self.result = rendered.map(to_text).unwrap_or_default();
        self.result_scroll = 0;
        Ok(())
    }

    fn show_status(&mut self, status: &str) -> Result<(), IoError> {
        self.status = status.to_string();
        Ok(())
    }

    fn reset_input(&mut self) -> Result<(), IoError> {
        self.field.clear();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), IoError> {
        self.draw().map_err(IoError::from)
    }
}

impl Drop for TerminalHost {
    fn drop(&mut self) {
        ratatui::restore();
    }
}

/// Everything one frame shows.
struct Screen<'a> {
    field: &'a ExpressionField,
    document: &'a Text<'static>,
    result: &'a Text<'static>,
    status: &'a str,
    result_scroll: u16,
}

impl Screen<'_> {
    /// Draw the frame. Returns the inner height of the result pane.
    fn render(&self, frame: &mut Frame) -> u16 {
        let [title, _, prompt, _, panes, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(panes);

        frame.render_widget(
            Line::styled(TITLE, Style::new().add_modifier(Modifier::BOLD)),
            title,
        );

        let label = Style::new()
            .fg(Color::Black)
            .bg(Color::Gray)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Line::from(vec![
                Span::styled(PROMPT, label),
                Span::raw(self.field.text()),
            ]),
            prompt,
        );

        frame.render_widget(
            Paragraph::new(self.document.clone()).block(Block::bordered().title(INPUT_TITLE)),
            left,
        );
        frame.render_widget(
            Paragraph::new(self.result.clone())
                .block(Block::bordered().title(RESULT_TITLE))
                .scroll((self.result_scroll, 0)),
            right,
        );

        frame.render_widget(Line::raw(format!("{STATUS_PREFIX}{}", self.status)), status);

        let column = PROMPT.len() + self.field.cursor_column();
        let x = u16::try_from(column)
            .unwrap_or(u16::MAX)
            .min(prompt.right().saturating_sub(1));
        frame.set_cursor_position((x, prompt.y));

        right.height.saturating_sub(2)
    }
}

/// Turn highlighter output into ratatui lines, breaking on `\n`.
pub fn to_text(rendered: &StyledText) -> Text<'static> {
    let mut lines = vec![Line::default()];
    for (style, content) in &rendered.buffer {
        let style = convert_style(style);
        for (i, part) in content.split('\n').enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }
            if part.is_empty() {
                continue;
            }
            if let Some(line) = lines.last_mut() {
                line.push_span(Span::styled(part.to_string(), style));
            }
        }
    }
    Text::from(lines)
}

fn convert_style(style: &nu_ansi_term::Style) -> Style {
    let mut converted = Style::new();
    if let Some(fg) = style.foreground {
        converted = converted.fg(convert_color(fg));
    }
    if let Some(bg) = style.background {
        converted = converted.bg(convert_color(bg));
    }
    let modifiers = [
        (style.is_bold, Modifier::BOLD),
        (style.is_dimmed, Modifier::DIM),
        (style.is_italic, Modifier::ITALIC),
        (style.is_underline, Modifier::UNDERLINED),
        (style.is_reverse, Modifier::REVERSED),
        (style.is_strikethrough, Modifier::CROSSED_OUT),
    ];
    for (set, modifier) in modifiers {
        if set {
            converted = converted.add_modifier(modifier);
        }
    }
    converted
}

fn convert_color(color: nu_ansi_term::Color) -> Color {
    use nu_ansi_term::Color as Ansi;
    match color {
        Ansi::Black => Color::Black,
        Ansi::DarkGray => Color::DarkGray,
        Ansi::Red => Color::Red,
        Ansi::LightRed => Color::LightRed,
        Ansi::Green => Color::Green,
        Ansi::LightGreen => Color::LightGreen,
        Ansi::Yellow => Color::Yellow,
        Ansi::LightYellow => Color::LightYellow,
        Ansi::Blue => Color::Blue,
        Ansi::LightBlue => Color::LightBlue,
        Ansi::Purple | Ansi::Magenta => Color::Magenta,
        Ansi::LightPurple | Ansi::LightMagenta => Color::LightMagenta,
        Ansi::Cyan => Color::Cyan,
        Ansi::LightCyan => Color::LightCyan,
        // ANSI 37 and 97.
        Ansi::White => Color::Gray,
        Ansi::LightGray => Color::White,
        Ansi::Fixed(n) => Color::Indexed(n),
        Ansi::Rgb(r, g, b) => Color::Rgb(r, g, b),
        Ansi::Default => Color::Reset,
    }
}
