//! Command palette overlay.
//!
//! Reads the shared [`ActionRegistry`] on every query change and shows the
//! matching actions grouped by section. Groups follow [`Section::ALL`] and
//! keep the registry's order inside each group. Inert actions are shown
//! dimmed and can never be selected.

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List as RatatuiList, ListItem, ListState, Paragraph};
use tracing::debug;

use crate::Theme;
use crate::action::{Action, ActionRegistry, Section};
use crate::config::{GlobalAction, KeyResolver, PaletteAction};
use crate::search::Matcher;
use crate::theme::parse_hex_color;
use crate::ui::{Component, EventResult, QueryInput, Result};

pub enum PaletteEvent {
    Selected(Action),
    Closed,
}

pub struct CommandPalette {
    registry: Arc<ActionRegistry>,
    resolver: Arc<KeyResolver>,
    matcher: Matcher,
    query: QueryInput,
    /// Indices into `registry.list_actions()`, in display order.
    visible: Vec<usize>,
    /// Position in `visible` of the highlighted action.
    selected: Option<usize>,
    list_state: ListState,
}

impl CommandPalette {
    pub fn new(registry: Arc<ActionRegistry>, resolver: Arc<KeyResolver>) -> Self {
        let mut palette = Self {
            registry,
            resolver,
            matcher: Matcher::new(),
            query: QueryInput::new().with_placeholder("Type a command or search…"),
            visible: Vec::new(),
            selected: None,
            list_state: ListState::default(),
        };
        palette.refilter();
        palette
    }

    pub fn query(&self) -> &str {
        self.query.value()
    }

    /// Actions currently shown, in display order.
    pub fn visible_actions(&self) -> Vec<&Action> {
        let actions = self.registry.list_actions();
        self.visible.iter().map(|&i| &actions[i]).collect()
    }

    pub fn selected_action(&self) -> Option<&Action> {
        let index = *self.visible.get(self.selected?)?;
        self.registry.list_actions().get(index)
    }

    /// Append pasted text to the query.
    pub fn handle_paste(&mut self, text: &str) {
        if self.query.insert_str(text) {
            self.refilter();
        }
    }

    fn refilter(&mut self) {
        let actions = self.registry.list_actions();
        let query = self.query.value();
        self.visible = Section::ALL
            .into_iter()
            .flat_map(|section| {
                actions
                    .iter()
                    .enumerate()
                    .filter(move |(_, a)| a.section == section)
            })
            .filter(|(_, a)| self.matcher.matches_any(a.search_texts(), query))
            .map(|(i, _)| i)
            .collect();
        self.selected = self.first_actionable();
    }

    fn is_actionable_at(&self, position: usize) -> bool {
        self.visible
            .get(position)
            .and_then(|&i| self.registry.list_actions().get(i))
            .is_some_and(Action::is_actionable)
    }

    fn first_actionable(&self) -> Option<usize> {
        (0..self.visible.len()).find(|&p| self.is_actionable_at(p))
    }

    /// Move to the next actionable row in `forward` direction, wrapping.
    fn step(&mut self, forward: bool) {
        let len = self.visible.len();
        let Some(current) = self.selected else {
            return;
        };
        for offset in 1..=len {
            let candidate = if forward {
                (current + offset) % len
            } else {
                (current + len - offset) % len
            };
            if self.is_actionable_at(candidate) {
                self.selected = Some(candidate);
                return;
            }
        }
    }

    fn build_items(&self, theme: &Theme, width: u16) -> (Vec<ListItem<'static>>, Option<usize>) {
        let actions = self.registry.list_actions();
        let mut items = Vec::new();
        let mut highlighted = None;
        let mut current_section = None;

        for (position, &index) in self.visible.iter().enumerate() {
            let action = &actions[index];
            if current_section != Some(action.section) {
                current_section = Some(action.section);
                items.push(ListItem::new(Line::from(Span::styled(
                    action.section.label().to_uppercase(),
                    Style::default()
                        .fg(theme.text_quaternary())
                        .add_modifier(Modifier::BOLD),
                ))));
            }
            if self.selected == Some(position) {
                highlighted = Some(items.len());
            }
            items.push(ListItem::new(action_line(action, theme, width)));
        }

        (items, highlighted)
    }
}

fn action_line(action: &Action, theme: &Theme, width: u16) -> Line<'static> {
    let actionable = action.is_actionable();
    let name_style = if actionable {
        Style::default().fg(theme.text_primary())
    } else {
        Style::default()
            .fg(theme.muted())
            .add_modifier(Modifier::ITALIC)
    };
    let marker_color = action
        .color
        .as_deref()
        .and_then(parse_hex_color)
        .unwrap_or_else(|| theme.accent());

    let mut spans = vec![
        Span::styled("  ● ", Style::default().fg(marker_color)),
        Span::styled(action.name.clone(), name_style),
    ];
    let mut used = 4 + action.name.chars().count();

    if let Some(subtitle) = &action.subtitle {
        spans.push(Span::styled(
            format!("  {subtitle}"),
            Style::default().fg(theme.text_tertiary()),
        ));
        used += 2 + subtitle.chars().count();
    }

    if let Some(shortcut) = action.shortcut.as_ref().filter(|s| !s.is_empty()) {
        let label = shortcut.join(" ");
        // Leave room for the highlight symbol and a trailing space.
        let available = usize::from(width).saturating_sub(used + 3);
        let label_width = label.chars().count();
        if label_width < available {
            spans.push(Span::raw(" ".repeat(available - label_width)));
            spans.push(Span::styled(label, Style::default().fg(theme.key_hint())));
        }
    }

    Line::from(spans)
}

impl Component for CommandPalette {
    type Output = PaletteEvent;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_palette(&key, PaletteAction::Close)
            || self.resolver.matches_global(&key, GlobalAction::Palette)
        {
            return Ok(PaletteEvent::Closed.into());
        }

        if self.resolver.matches_palette(&key, PaletteAction::Next) {
            self.step(true);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_palette(&key, PaletteAction::Previous) {
            self.step(false);
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_palette(&key, PaletteAction::Execute) {
            return Ok(match self.selected_action() {
                Some(action) if action.is_actionable() => {
                    debug!("Palette selected {:?}", action.name);
                    PaletteEvent::Selected(action.clone()).into()
                }
                Some(action) => {
                    debug!("Ignoring selection of inert action {:?}", action.name);
                    EventResult::Consumed
                }
                None => EventResult::Consumed,
            });
        }

        if self.query.handle_key(key) == Some(true) {
            self.refilter();
        }
        // The palette is modal: nothing leaks to the page below.
        Ok(EventResult::Consumed)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(50), Constraint::Percentage(60));
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!(
                " Command palette ({}) ",
                self.resolver.display_global(GlobalAction::Palette)
            ))
            .title_style(Style::default().fg(theme.accent()).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border_focused()))
            .style(Style::default().bg(theme.base));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let [input_area, separator_area, list_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        self.query.render(frame, input_area, theme);
        frame.render_widget(
            Paragraph::new("─".repeat(usize::from(separator_area.width)))
                .style(Style::default().fg(theme.border())),
            separator_area,
        );

        if self.visible.is_empty() {
            frame.render_widget(
                Paragraph::new("  No results").style(Style::default().fg(theme.muted())),
                list_area,
            );
            return;
        }

        let (items, highlighted) = self.build_items(theme, list_area.width);
        self.list_state.select(highlighted);
        let list = RatatuiList::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▌");
        frame.render_stateful_widget(list, list_area, &mut self.list_state);
    }
}
