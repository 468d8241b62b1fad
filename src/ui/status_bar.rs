use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, NavAction};
use crate::route::Route;
use crate::theme::ThemeMode;
use crate::ui::{Keybinding, truncate_str};

pub struct StatusBar {
    resolver: Arc<KeyResolver>,
    route: Route,
    mode: ThemeMode,
    footer: String,
    glyph: String,
}

impl StatusBar {
    pub fn new(
        resolver: Arc<KeyResolver>,
        footer: impl Into<String>,
        glyph: impl Into<String>,
    ) -> Self {
        Self {
            resolver,
            route: Route::Home,
            mode: ThemeMode::System,
            footer: footer.into(),
            glyph: glyph.into(),
        }
    }

    pub fn set_route(&mut self, route: Route) {
        self.route = route;
    }

    pub const fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub fn render_with_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border()));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        // Split into three columns: location (left), keybindings (middle), footer (right)
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(28),
                Constraint::Min(20),
                Constraint::Length(32),
            ])
            .split(inner_area);

        self.render_location(frame, chunks[0], theme);
        self.render_keybindings(frame, chunks[1], theme, local_keybindings);
        self.render_footer(frame, chunks[2], theme);
    }

    fn render_location(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let w = area.width as usize;
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("{} ", self.glyph),
                    Style::default().fg(theme.header()),
                ),
                Span::styled(
                    truncate_str(self.route.path(), w.saturating_sub(3)),
                    Style::default()
                        .fg(theme.header())
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("theme ", Style::default().fg(theme.text_quaternary())),
                Span::styled(self.mode.label(), Style::default().fg(theme.text_secondary())),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_keybindings(
        &self,
        frame: &mut Frame,
        area: Rect,
        theme: &Theme,
        local_keybindings: &[Keybinding],
    ) {
        let global_keybindings = self.global_keybindings();

        // Local hints first, then global ones.
        let hints: Vec<&Keybinding> = local_keybindings
            .iter()
            .filter(|kb| kb.hint)
            .chain(global_keybindings.iter().filter(|kb| kb.hint))
            .collect();

        if hints.is_empty() || area.height == 0 {
            return;
        }

        // Align the separators into a straight column regardless of key length.
        let max_key_w = hints.iter().map(|kb| kb.key.chars().count()).max().unwrap_or(1);
        let max_desc_w = hints
            .iter()
            .map(|kb| kb.description.chars().count())
            .max()
            .unwrap_or(1);
        // key + " │ " + desc + gap
        let col_width = u16::try_from(max_key_w + 3 + max_desc_w + 2).unwrap_or(u16::MAX);
        let num_cols = (area.width / col_width).max(1) as usize;
        let num_rows = area.height as usize;

        let mut columns: Vec<Vec<Line>> = vec![Vec::new(); num_cols];
        for (i, kb) in hints.iter().enumerate() {
            let col_idx = i / num_rows;
            if col_idx >= num_cols {
                break;
            }
            columns[col_idx].push(Line::from(vec![
                Span::styled(
                    format!("{:>width$}", kb.key, width = max_key_w),
                    Style::default().fg(theme.key_hint()),
                ),
                Span::styled(" │ ", Style::default().fg(theme.border())),
                Span::styled(
                    kb.description.clone(),
                    Style::default().fg(theme.text_tertiary()),
                ),
            ]));
        }

        let col_areas = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Length(col_width); num_cols])
            .split(area);

        for (col_area, col_lines) in col_areas.iter().zip(columns) {
            frame.render_widget(Paragraph::new(col_lines), *col_area);
        }
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let footer = truncate_str(&self.footer, area.width as usize);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                footer,
                Style::default().fg(theme.text_quaternary()),
            )))
            .alignment(Alignment::Right),
            area,
        );
    }

    /// Global keybindings, shared with the help overlay.
    pub fn global_keybindings(&self) -> Vec<Keybinding> {
        vec![
            Keybinding::hint(
                self.resolver.display_global(GlobalAction::Palette),
                "Commands",
            ),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Help), "Help"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Back), "Back"),
            Keybinding::new(
                self.resolver.display_global(GlobalAction::ToggleTheme),
                "Toggle theme",
            ),
            Keybinding::hint(self.resolver.display_global(GlobalAction::Quit), "Quit"),
            Keybinding::new(self.resolver.display_global(GlobalAction::Suspend), "Suspend"),
            Keybinding::new(self.resolver.display_nav(NavAction::Select), "Select"),
            Keybinding::new(
                format!(
                    "{}/{}",
                    self.resolver.display_nav(NavAction::Up),
                    self.resolver.display_nav(NavAction::Down)
                ),
                "Navigate",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::{buffer_text, render_to_buffer};

    #[test]
    fn test_global_keybindings_follow_config() {
        let bar = StatusBar::new(Arc::new(KeyResolver::default()), "", "");
        let bindings = bar.global_keybindings();
        assert_eq!(bindings[0].key, "ctrl+k");
        assert_eq!(bindings[0].description, "Commands");
        assert!(bindings.iter().any(|kb| kb.description == "Quit" && kb.key == "q"));
        assert!(bindings.iter().any(|kb| kb.description == "Suspend" && kb.key == "ctrl+z"));
    }

    #[test]
    fn test_renders_route_mode_and_footer() {
        let mut bar = StatusBar::new(
            Arc::new(KeyResolver::default()),
            "© By Ryan Waits 2026",
            "👋",
        );
        bar.set_route(Route::Writing);
        bar.set_mode(ThemeMode::Dark);
        let theme = Theme::dark();

        let buffer = render_to_buffer(120, 3, |frame| {
            bar.render_with_keybindings(
                frame,
                frame.area(),
                &theme,
                &[Keybinding::hint("enter", "Open")],
            );
        });
        let text = buffer_text(&buffer);
        assert!(text.contains("/writing"));
        assert!(text.contains("theme Dark"));
        assert!(text.contains("Open"));
        assert!(text.contains("Ryan Waits 2026"));
    }
}
