use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List as RatatuiList, ListItem, ListState};

use crate::Theme;
use crate::config::{KeyResolver, NavAction};
use crate::ui::{Component, EventResult, Result};

const PAGE_STEP: usize = 5;

pub enum ListEvent<T> {
    Changed(T),
    Activated(T),
}

pub trait ListRow {
    fn render_row(&self, theme: &Theme) -> ListItem<'static>;
}

/// Selectable list driven by the navigation keybindings.
pub struct List<T: ListRow + Clone> {
    items: Vec<T>,
    state: ListState,
    resolver: Arc<KeyResolver>,
}

impl<T: ListRow + Clone> List<T> {
    pub fn new(items: Vec<T>, resolver: Arc<KeyResolver>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self {
            items,
            state,
            resolver,
        }
    }

    pub fn selected(&self) -> Option<&T> {
        self.state.selected().and_then(|i| self.items.get(i))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn select(&mut self, index: usize) {
        if !self.items.is_empty() {
            self.state.select(Some(index.min(self.items.len() - 1)));
        }
    }

    fn change_event(&self, before: Option<usize>) -> EventResult<ListEvent<T>> {
        if let Some(selected) = self.state.selected()
            && Some(selected) != before
            && let Some(item) = self.items.get(selected)
        {
            return ListEvent::Changed(item.clone()).into();
        }
        EventResult::Consumed
    }
}

impl<T: ListRow + Clone> Component for List<T> {
    type Output = ListEvent<T>;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.items.is_empty() {
            return Ok(EventResult::Ignored);
        }

        let before = self.state.selected();
        let current = before.unwrap_or(0);

        if self.resolver.matches_nav(&key, NavAction::Down) {
            self.select(current + 1);
        } else if self.resolver.matches_nav(&key, NavAction::Up) {
            self.select(current.saturating_sub(1));
        } else if self.resolver.matches_nav(&key, NavAction::Home) {
            self.select(0);
        } else if self.resolver.matches_nav(&key, NavAction::End) {
            self.select(self.items.len() - 1);
        } else if self.resolver.matches_nav(&key, NavAction::PageDown) {
            self.select(current + PAGE_STEP);
        } else if self.resolver.matches_nav(&key, NavAction::PageUp) {
            self.select(current.saturating_sub(PAGE_STEP));
        } else if self.resolver.matches_nav(&key, NavAction::Select) {
            return Ok(self
                .selected()
                .map_or(EventResult::Ignored, |item| {
                    ListEvent::Activated(item.clone()).into()
                }));
        } else {
            return Ok(EventResult::Ignored);
        }

        Ok(self.change_event(before))
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let items: Vec<ListItem> = self.items.iter().map(|i| i.render_row(theme)).collect();

        let list = RatatuiList::new(items)
            .highlight_style(
                Style::default()
                    .bg(theme.selection_bg())
                    .fg(theme.border_focused())
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, area, &mut self.state);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row(&'static str);

    impl ListRow for Row {
        fn render_row(&self, _theme: &Theme) -> ListItem<'static> {
            ListItem::new(self.0)
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn list() -> List<Row> {
        List::new(
            vec![Row("a"), Row("b"), Row("c")],
            Arc::new(KeyResolver::default()),
        )
    }

    #[test]
    fn test_navigation_clamps_at_edges() {
        let mut list = list();
        list.handle_key(key(KeyCode::Up)).unwrap();
        assert_eq!(list.selected(), Some(&Row("a")));

        for _ in 0..5 {
            list.handle_key(key(KeyCode::Char('j'))).unwrap();
        }
        assert_eq!(list.selected(), Some(&Row("c")));

        list.handle_key(key(KeyCode::Char('g'))).unwrap();
        assert_eq!(list.selected(), Some(&Row("a")));
    }

    #[test]
    fn test_change_and_activate_events() {
        let mut list = list();
        let result = list.handle_key(key(KeyCode::Down)).unwrap();
        assert!(matches!(result, EventResult::Event(ListEvent::Changed(Row("b")))));

        let result = list.handle_key(key(KeyCode::Enter)).unwrap();
        assert!(matches!(result, EventResult::Event(ListEvent::Activated(Row("b")))));

        let result = list.handle_key(key(KeyCode::Char('x'))).unwrap();
        assert_eq!(
            std::mem::discriminant(&result),
            std::mem::discriminant(&EventResult::Ignored)
        );
    }

    #[test]
    fn test_empty_list_ignores_keys() {
        let mut list: List<Row> = List::new(Vec::new(), Arc::new(KeyResolver::default()));
        assert!(list.is_empty());
        assert!(!list.handle_key(key(KeyCode::Enter)).unwrap().is_consumed());
    }
}
