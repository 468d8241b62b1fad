use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::Theme;
use crate::config::{DialogAction, KeyResolver};
use crate::ui::{Component, EventResult, Result};

pub enum ErrorDialogEvent {
    Dismissed,
}

/// Modal shown when a handler or clipboard operation fails.
pub struct ErrorDialog {
    title: String,
    message: String,
    resolver: Arc<KeyResolver>,
}

impl ErrorDialog {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        resolver: Arc<KeyResolver>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            resolver,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Component for ErrorDialog {
    type Output = ErrorDialogEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_dialog(&key, DialogAction::Dismiss) {
            return Ok(ErrorDialogEvent::Dismissed.into());
        }
        // Modal: swallow everything else.
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Percentage(40));
        frame.render_widget(Clear, popup_area);

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                self.message.as_str(),
                Style::default().fg(theme.text_primary()),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!(
                    "Press {} to dismiss",
                    self.resolver.display_dialog(DialogAction::Dismiss)
                ),
                Style::default().fg(theme.text_quaternary()),
            )),
        ];

        let block = Block::default()
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(theme.error()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.error()))
            .style(Style::default().bg(theme.base));

        let paragraph = Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });

        frame.render_widget(paragraph, popup_area);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::ui::test_support::{buffer_text, render_to_buffer};

    #[test]
    fn test_dismiss_and_swallow() {
        let mut dialog = ErrorDialog::new("Error", "boom", Arc::new(KeyResolver::default()));
        let result = dialog
            .handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(result, EventResult::Consumed));

        let result = dialog
            .handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .unwrap();
        assert!(matches!(result, EventResult::Event(ErrorDialogEvent::Dismissed)));
    }

    #[test]
    fn test_renders_message() {
        let mut dialog = ErrorDialog::new(
            "Theme failed",
            "clipboard unavailable",
            Arc::new(KeyResolver::default()),
        );
        let theme = Theme::dark();
        let buffer = render_to_buffer(80, 20, |frame| {
            dialog.render(frame, frame.area(), &theme);
        });
        let text = buffer_text(&buffer);
        assert!(text.contains("Theme failed"));
        assert!(text.contains("clipboard unavailable"));
        assert_eq!(dialog.message(), "clipboard unavailable");
    }
}
