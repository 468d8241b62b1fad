use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{ListItem, Paragraph};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::page::{Page, PageEvent, heading};
use crate::route::Route;
use crate::site::{BlogConfig, Post, SiteConfig};
use crate::ui::{Component, EventResult, Keybinding, List, ListEvent, ListRow, Result};

const DATE_FORMAT: &str = "%b %d, %Y";

#[derive(Debug, Clone, PartialEq, Eq)]
struct PostRow {
    post: Post,
    read_more: String,
}

impl ListRow for PostRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static> {
        let post = &self.post;
        let date = post
            .date
            .map_or_else(|| "Undated".to_string(), |d| d.format(DATE_FORMAT).to_string());

        let mut title = vec![
            Span::styled(
                format!("{date:<14}"),
                Style::default().fg(theme.text_quaternary()),
            ),
            Span::styled(
                post.title.clone(),
                Style::default()
                    .fg(theme.text_primary())
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        if post.href.is_some() {
            title.push(Span::styled(
                format!("  {} ↗", self.read_more),
                Style::default().fg(theme.link()),
            ));
        }

        let mut lines = vec![Line::from(title)];
        if let Some(summary) = &post.summary {
            lines.push(Line::from(vec![
                Span::raw(" ".repeat(14)),
                Span::styled(
                    summary.clone(),
                    Style::default().fg(theme.text_tertiary()),
                ),
            ]));
        }
        ListItem::new(Text::from(lines))
    }
}

/// Index of posts, newest first.
pub struct WritingPage {
    posts: List<PostRow>,
    resolver: Arc<KeyResolver>,
}

impl WritingPage {
    pub fn new(site: &SiteConfig, blog: &BlogConfig, resolver: Arc<KeyResolver>) -> Self {
        let rows = site
            .posts_newest_first()
            .into_iter()
            .map(|post| PostRow {
                post: post.clone(),
                read_more: blog.read_more.clone(),
            })
            .collect();
        Self {
            posts: List::new(rows, resolver.clone()),
            resolver,
        }
    }
}

impl Page for WritingPage {
    fn route(&self) -> Route {
        Route::Writing
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<PageEvent>> {
        Ok(match self.posts.handle_key(key)? {
            EventResult::Event(ListEvent::Activated(row)) => match row.post.href {
                Some(href) => PageEvent::Copy {
                    text: href,
                    label: row.post.title,
                }
                .into(),
                None => EventResult::Consumed,
            },
            EventResult::Event(ListEvent::Changed(_)) | EventResult::Consumed => {
                EventResult::Consumed
            }
            EventResult::Ignored => EventResult::Ignored,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [title_area, _, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(area);

        frame.render_widget(Paragraph::new(heading("Writing", theme)), title_area);

        if self.posts.is_empty() {
            frame.render_widget(
                Paragraph::new("Nothing published yet.").style(Style::default().fg(theme.muted())),
                list_area,
            );
            return;
        }
        self.posts.render(frame, list_area, theme);
    }

    fn keybindings(&self) -> Vec<Keybinding> {
        if self.posts.is_empty() {
            return vec![];
        }
        vec![Keybinding::hint(
            self.resolver.display_nav(NavAction::Select),
            "Copy link",
        )]
    }
}
