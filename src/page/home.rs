use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{ListItem, Paragraph, Wrap};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::page::{Page, PageEvent, heading};
use crate::route::{Route, is_external};
use crate::site::{ContactLink, SiteConfig};
use crate::ui::{Component, EventResult, Keybinding, List, ListEvent, ListRow, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ContactRow(ContactLink);

impl ListRow for ContactRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        let contact = &self.0;
        let mut spans = vec![
            Span::styled(
                format!("{:<10}", contact.label()),
                Style::default().fg(theme.text_tertiary()),
            ),
            Span::styled(
                contact.title.clone(),
                Style::default().fg(theme.link()),
            ),
        ];
        if contact.copy_target().is_some_and(is_external) {
            spans.push(Span::styled(" ↗", Style::default().fg(theme.muted())));
        }
        ListItem::new(Line::from(spans))
    }
}

pub struct HomePage {
    owner: String,
    tagline: String,
    badge: String,
    about: Vec<String>,
    contacts: List<ContactRow>,
    resolver: Arc<KeyResolver>,
}

impl HomePage {
    pub fn new(site: &SiteConfig, resolver: Arc<KeyResolver>) -> Self {
        let contacts = site.contacts.iter().cloned().map(ContactRow).collect();
        Self {
            owner: site.owner.clone(),
            tagline: site.tagline.clone(),
            badge: site.badge.clone(),
            about: site.about.clone(),
            contacts: List::new(contacts, resolver.clone()),
            resolver,
        }
    }

    fn header(&self, theme: &Theme) -> Vec<Line<'static>> {
        vec![
            Line::from(vec![
                Span::styled(
                    self.owner.clone(),
                    Style::default()
                        .fg(theme.text_primary())
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(self.badge.clone()),
            ]),
            Line::from(Span::styled(
                self.tagline.clone(),
                Style::default().fg(theme.text_secondary()),
            )),
        ]
    }
}

impl Page for HomePage {
    fn route(&self) -> Route {
        Route::Home
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<PageEvent>> {
        let result = self.contacts.handle_key(key)?;
        Ok(match result {
            EventResult::Event(ListEvent::Activated(ContactRow(contact))) => {
                match contact.copy_target() {
                    Some(target) => PageEvent::Copy {
                        text: target.to_string(),
                        label: contact.label().to_string(),
                    }
                    .into(),
                    None => EventResult::Consumed,
                }
            }
            EventResult::Event(ListEvent::Changed(_)) | EventResult::Consumed => {
                EventResult::Consumed
            }
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let contacts_height = u16::try_from(self.contacts.len()).unwrap_or(u16::MAX);
        let [header_area, _, contact_title, contact_area, _, about_title, about_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(contacts_height),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .areas(area);

        frame.render_widget(Paragraph::new(self.header(theme)), header_area);

        frame.render_widget(Paragraph::new(heading("Contact", theme)), contact_title);
        self.contacts.render(frame, contact_area, theme);

        frame.render_widget(Paragraph::new(heading("About me", theme)), about_title);
        let mut about: Vec<Line> = Vec::new();
        for (i, paragraph) in self.about.iter().enumerate() {
            if i > 0 {
                about.push(Line::from(""));
            }
            about.push(Line::from(Span::styled(
                paragraph.clone(),
                Style::default().fg(theme.text_secondary()),
            )));
        }
        frame.render_widget(
            Paragraph::new(about).wrap(Wrap { trim: true }),
            about_area,
        );
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        vec![Keybinding::hint(
            self.resolver.display_nav(NavAction::Select),
            "Copy link",
        )]
    }
}
