use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Theme;
use crate::page::Page;
use crate::route::Route;

pub struct NotFoundPage {
    path: String,
}

impl NotFoundPage {
    pub const fn new(path: String) -> Self {
        Self { path }
    }
}

impl Page for NotFoundPage {
    fn route(&self) -> Route {
        Route::NotFound(self.path.clone())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    "404",
                    Style::default()
                        .fg(theme.text_primary())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" │ ", Style::default().fg(theme.border())),
                Span::styled(
                    "This page could not be found.",
                    Style::default().fg(theme.text_secondary()),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                self.path.clone(),
                Style::default().fg(theme.muted()),
            )),
        ];
        let area = area.centered(Constraint::Percentage(100), Constraint::Length(3));
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{buffer_text, render_to_buffer};

    #[test]
    fn test_renders_message_and_path() {
        let mut page = NotFoundPage::new("/uses".to_string());
        assert_eq!(page.route(), Route::NotFound("/uses".to_string()));

        let theme = Theme::dark();
        let buffer = render_to_buffer(60, 9, |frame| {
            page.render(frame, frame.area(), &theme);
        });
        let text = buffer_text(&buffer);
        assert!(text.contains("404 │ This page could not be found."));
        assert!(text.contains("/uses"));
    }
}
