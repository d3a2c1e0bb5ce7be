//! Single-line editor for numeric form fields.
//!
//! Accepts only the characters that can appear in a decimal or scientific
//! literal. Parsing is left to the caller so that half-typed input such as
//! `"1e"` can sit in the buffer until the edit is committed.

use crate::core::params::NumericField;

/// Edit buffer bound to one numeric field.
pub struct NumberInput {
    field: NumericField,
    content: String,
    /// Byte offset; content is ASCII so it is also the char offset.
    cursor: usize,
}

impl NumberInput {
    /// Start editing with the field's current value, cursor at the end.
    pub fn new(field: NumericField, value: f64) -> Self {
        let content = if value.is_nan() {
            String::new()
        } else {
            value.to_string()
        };
        let cursor = content.len();
        Self {
            field,
            content,
            cursor,
        }
    }

    pub fn field(&self) -> NumericField {
        self.field
    }

    pub fn accepts(c: char) -> bool {
        c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
    }

    /// Insert at the cursor. Returns false for rejected characters.
    pub fn insert_char(&mut self, c: char) -> bool {
        if !Self::accepts(c) {
            return false;
        }
        self.content.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.content.remove(self.cursor);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.content.len() {
            self.content.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.content.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.content.len();
    }

    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    pub fn text(&self) -> &str {
        &self.content
    }

    pub fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Consume the editor, yielding the raw text for binding.
    pub fn commit(self) -> (NumericField, String) {
        (self.field, self.content)
    }
}
