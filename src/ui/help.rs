use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::Theme;
use crate::ui::{Component, EventResult, KeybindingSection, Result};

pub enum HelpEvent {
    Close,
}

/// Keybinding reference, one block per section.
pub struct HelpOverlay {
    sections: Vec<KeybindingSection>,
}

impl HelpOverlay {
    pub const fn new(sections: Vec<KeybindingSection>) -> Self {
        Self { sections }
    }

    fn lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let key_style = Style::default()
            .fg(theme.key_hint())
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.text_primary());
        let section_style = Style::default()
            .fg(theme.text_tertiary())
            .add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            if section.keybindings.is_empty() {
                continue;
            }
            if i > 0 {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("── {} ──", section.title),
                section_style,
            )));
            for kb in &section.keybindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>14}", kb.key), key_style),
                    Span::raw("  "),
                    Span::styled(kb.description.clone(), desc_style),
                ]));
            }
        }
        lines
    }
}

impl Component for HelpOverlay {
    type Output = HelpEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        Ok(match key.code {
            KeyCode::Esc | KeyCode::Char('?' | 'q') => HelpEvent::Close.into(),
            _ => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Percentage(70));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Help (press ? or Esc to close) ")
            .title_style(Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.base));

        frame.render_widget(Paragraph::new(self.lines(theme)).block(block), popup_area);
    }
}
