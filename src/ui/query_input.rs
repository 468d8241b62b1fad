use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;

/// Single-line editable query. The cursor is a char index, not a byte index.
#[derive(Debug, Default)]
pub struct QueryInput {
    value: String,
    cursor: usize,
    placeholder: Option<String>,
}

impl QueryInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.value
            .char_indices()
            .nth(char_index)
            .map_or(self.value.len(), |(i, _)| i)
    }

    fn char_len(&self) -> usize {
        self.value.chars().count()
    }

    fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.value.insert(at, c);
        self.cursor += 1;
    }

    fn delete_char_before_cursor(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    fn delete_char_at_cursor(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.value.remove(at);
        }
    }

    fn delete_word_before_cursor(&mut self) {
        let chars: Vec<char> = self.value.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1] == ' ' {
            pos -= 1;
        }
        while pos > 0 && chars[pos - 1] != ' ' {
            pos -= 1;
        }
        let start = self.byte_index(pos);
        let end = self.byte_index(self.cursor);
        self.value.drain(start..end);
        self.cursor = pos;
    }

    /// Insert pasted text at the cursor. Line breaks and other control
    /// characters are dropped. Returns whether the value changed.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let before = self.value.len();
        for c in text.chars().filter(|c| !c.is_control()) {
            self.insert_char(c);
        }
        self.value.len() != before
    }

    /// Apply an editing key and report whether the value changed.
    ///
    /// Returns `None` for keys that are not editing keys.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<bool> {
        let before = self.value.len();
        match (key.code, key.modifiers) {
            (KeyCode::Backspace, KeyModifiers::ALT)
            | (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word_before_cursor(),
            (KeyCode::Backspace, _) => self.delete_char_before_cursor(),
            (KeyCode::Delete, _) => self.delete_char_at_cursor(),
            (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
            (KeyCode::Right, _) => self.cursor = (self.cursor + 1).min(self.char_len()),
            (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => self.cursor = 0,
            (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.char_len();
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear(),
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => self.insert_char(c),
            _ => return None,
        }
        Some(self.value.len() != before)
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let input_style = Style::default().fg(theme.text_primary());
        let cursor_style = Style::default()
            .fg(theme.base)
            .bg(theme.text_primary())
            .add_modifier(Modifier::BOLD);
        let prompt = Span::styled("› ", Style::default().fg(theme.accent()));

        let line = match (&self.placeholder, self.value.is_empty()) {
            (Some(placeholder), true) => Line::from(vec![
                prompt,
                Span::styled(" ", cursor_style),
                Span::styled(placeholder.clone(), Style::default().fg(theme.muted())),
            ]),
            _ => {
                let at = self.byte_index(self.cursor);
                let (before, after) = self.value.split_at(at);
                let mut rest = after.chars();
                let cursor_char = rest.next().unwrap_or(' ');
                Line::from(vec![
                    prompt,
                    Span::styled(before.to_string(), input_style),
                    Span::styled(cursor_char.to_string(), cursor_style),
                    Span::styled(rest.collect::<String>(), input_style),
                ])
            }
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut QueryInput, code: KeyCode, modifiers: KeyModifiers) -> Option<bool> {
        input.handle_key(KeyEvent::new(code, modifiers))
    }

    fn type_str(input: &mut QueryInput, text: &str) {
        for c in text.chars() {
            press(input, KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = QueryInput::new();
        type_str(&mut input, "wri");
        assert_eq!(input.value(), "wri");

        assert_eq!(
            press(&mut input, KeyCode::Backspace, KeyModifiers::NONE),
            Some(true)
        );
        assert_eq!(input.value(), "wr");
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = QueryInput::new();
        type_str(&mut input, "é✨x");
        press(&mut input, KeyCode::Left, KeyModifiers::NONE);
        press(&mut input, KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(input.value(), "éx");
        type_str(&mut input, "a");
        assert_eq!(input.value(), "éax");
    }

    #[test]
    fn test_paste_inserts_at_cursor_without_line_breaks() {
        let mut input = QueryInput::new();
        type_str(&mut input, "wg");
        press(&mut input, KeyCode::Left, KeyModifiers::NONE);
        assert!(input.insert_str("ritin\n"));
        assert_eq!(input.value(), "writing");
        assert!(!input.insert_str("\r\n"));
    }

    #[test]
    fn test_delete_word_and_clear() {
        let mut input = QueryInput::new();
        type_str(&mut input, "dark theme  ");
        press(&mut input, KeyCode::Backspace, KeyModifiers::ALT);
        assert_eq!(input.value(), "dark ");

        press(&mut input, KeyCode::Char('u'), KeyModifiers::CONTROL);
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_cursor_movement_does_not_change_value() {
        let mut input = QueryInput::new();
        type_str(&mut input, "ab");
        assert_eq!(press(&mut input, KeyCode::Left, KeyModifiers::NONE), Some(false));
        assert_eq!(press(&mut input, KeyCode::Home, KeyModifiers::NONE), Some(false));
        type_str(&mut input, "x");
        assert_eq!(input.value(), "xab");
    }

    #[test]
    fn test_non_editing_keys_are_left_alone() {
        let mut input = QueryInput::new();
        assert_eq!(press(&mut input, KeyCode::Enter, KeyModifiers::NONE), None);
        assert_eq!(press(&mut input, KeyCode::Down, KeyModifiers::NONE), None);
        assert_eq!(
            press(&mut input, KeyCode::Char('k'), KeyModifiers::CONTROL),
            None
        );
    }
}
