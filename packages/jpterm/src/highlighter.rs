use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};
use serde_json::Value as JsonValue;

use crate::format;

/// Lexical class of a fragment of serialized JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A string value.
    String,
    /// A string in key position (followed by `:`).
    Key,
    /// An integer or float.
    Number,
    /// `true`, `false` or `null`.
    Keyword,
    /// One of `{ } [ ] , :`.
    Punctuation,
    /// Whitespace between tokens.
    Text,
    /// Anything the lexer does not recognize.
    Error,
}

/// Used for token kinds without an entry in [`style_for`].
pub fn default_style() -> Style {
    Style::new().fg(Color::LightBlue)
}

/// Display style for a token kind.
pub fn style_for(kind: TokenKind) -> Style {
    match kind {
        TokenKind::String => Style::new().fg(Color::Green),
        TokenKind::Number => Style::new().fg(Color::Blue),
        TokenKind::Keyword | TokenKind::Punctuation => Style::new().fg(Color::LightBlue),
        TokenKind::Text | TokenKind::Key => Style::new().fg(Color::White),
        TokenKind::Error => default_style(),
    }
}

/// Split serialized JSON into classified fragments.
///
/// Concatenating the fragments yields the input unchanged. Malformed input
/// never fails; unrecognized characters come back as [`TokenKind::Error`].
pub fn tokenize(source: &str) -> Vec<(TokenKind, &str)> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let kind = match bytes[pos] {
            b' ' | b'\t' | b'\n' | b'\r' => {
                pos = skip_while(bytes, pos, |b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'));
                TokenKind::Text
            }
            b'"' => {
                pos = scan_string(bytes, pos);
                TokenKind::String
            }
            b'{' | b'}' | b'[' | b']' | b',' | b':' => {
                pos += 1;
                TokenKind::Punctuation
            }
            b'-' | b'0'..=b'9' => {
                pos = skip_while(bytes, pos + 1, |b| {
                    b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-')
                });
                TokenKind::Number
            }
            b'a'..=b'z' => {
                pos = skip_while(bytes, pos, |b| b.is_ascii_alphabetic());
                match &source[start..pos] {
                    "true" | "false" | "null" => TokenKind::Keyword,
                    _ => TokenKind::Error,
                }
            }
            _ => {
                pos += source[pos..].chars().next().map_or(1, char::len_utf8);
                TokenKind::Error
            }
        };
        tokens.push((kind, &source[start..pos]));
    }

    mark_keys(&mut tokens);
    tokens
}

fn skip_while(bytes: &[u8], mut pos: usize, pred: impl Fn(u8) -> bool) -> usize {
    while pos < bytes.len() && pred(bytes[pos]) {
        pos += 1;
    }
    pos
}

/// Returns the position just past the closing quote, or the end of input.
fn scan_string(bytes: &[u8], start: usize) -> usize {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'\\' => pos += 2,
            b'"' => return pos + 1,
            _ => pos += 1,
        }
    }
    bytes.len()
}

fn mark_keys(tokens: &mut [(TokenKind, &str)]) {
    for i in 0..tokens.len() {
        if tokens[i].0 != TokenKind::String {
            continue;
        }
        let next = tokens[i + 1..]
            .iter()
            .find(|(kind, _)| *kind != TokenKind::Text);
        if matches!(next, Some((TokenKind::Punctuation, ":"))) {
            tokens[i].0 = TokenKind::Key;
        }
    }
}

/// Colorizes JSON for the input and result panes.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonHighlighter;

impl JsonHighlighter {
    pub fn new() -> Self {
        Self
    }

    /// Canonicalize a value and colorize the resulting text.
    pub fn render(&self, value: &JsonValue) -> StyledText {
        self.highlight(&format::canonical(value), 0)
    }
}

impl Highlighter for JsonHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled = StyledText::new();
        for (kind, text) in tokenize(line) {
            styled.push((style_for(kind), text.to_string()));
        }
        styled
    }
}

/// Concatenate the text of a styled buffer, dropping the styles.
pub fn plain_text(styled: &StyledText) -> String {
    styled.buffer.iter().map(|(_, text)| text.as_str()).collect()
}
