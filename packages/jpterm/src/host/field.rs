//! Single-line text field for the expression input.

/// Text plus a cursor. The cursor is a byte offset that always sits on a
/// character boundary.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpressionField {
    text: String,
    cursor: usize,
}

impl ExpressionField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters, for placing the terminal cursor.
    pub fn cursor_column(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    pub fn insert(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Delete the character before the cursor. Returns whether text changed.
    pub fn backspace(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(c) => {
                self.cursor -= c.len_utf8();
                self.text.remove(self.cursor);
                true
            }
            None => false,
        }
    }

    /// Delete the character under the cursor. Returns whether text changed.
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            true
        } else {
            false
        }
    }

    pub fn move_left(&mut self) {
        if let Some(c) = self.text[..self.cursor].chars().next_back() {
            self.cursor -= c.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(c) = self.text[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.text.len();
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> ExpressionField {
        let mut field = ExpressionField::new();
        for c in text.chars() {
            field.insert(c);
        }
        field
    }

    #[test]
    fn insert_appends_at_cursor() {
        let field = typed("a.b");
        assert_eq!(field.text(), "a.b");
        assert_eq!(field.cursor_column(), 3);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut field = typed("ac");
        field.move_left();
        field.insert('b');
        assert_eq!(field.text(), "abc");
        assert_eq!(field.cursor_column(), 2);
    }

    #[test]
    fn backspace_removes_previous_char() {
        let mut field = typed("ab");
        assert!(field.backspace());
        assert_eq!(field.text(), "a");
        assert!(field.backspace());
        assert!(!field.backspace());
        assert_eq!(field.text(), "");
    }

    #[test]
    fn delete_removes_char_under_cursor() {
        let mut field = typed("ab");
        assert!(!field.delete());
        field.move_to_start();
        assert!(field.delete());
        assert_eq!(field.text(), "b");
        assert_eq!(field.cursor_column(), 0);
    }

    #[test]
    fn multibyte_characters() {
        let mut field = typed("é☃");
        assert_eq!(field.cursor_column(), 2);
        field.move_left();
        assert_eq!(field.cursor_column(), 1);
        assert!(field.backspace());
        assert_eq!(field.text(), "☃");
        field.move_right();
        assert_eq!(field.cursor_column(), 1);
    }

    #[test]
    fn movement_stops_at_the_edges() {
        let mut field = typed("ab");
        field.move_right();
        assert_eq!(field.cursor_column(), 2);
        field.move_to_start();
        field.move_left();
        assert_eq!(field.cursor_column(), 0);
        field.move_to_end();
        assert_eq!(field.cursor_column(), 2);
    }

    #[test]
    fn clear_empties_everything() {
        let mut field = typed("abc");
        field.clear();
        assert_eq!(field.text(), "");
        assert_eq!(field.cursor_column(), 0);
    }
}
