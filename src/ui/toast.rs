use std::collections::VecDeque;
use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::Component;
use crate::Theme;

const TOAST_DURATION: Duration = Duration::from_secs(3);
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastType {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Toast {
    message: String,
    toast_type: ToastType,
    created_at: Instant,
    duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, toast_type: ToastType) -> Self {
        Self {
            message: message.into(),
            toast_type,
            created_at: Instant::now(),
            duration: TOAST_DURATION,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Success)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastType::Info)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn toast_type(&self) -> ToastType {
        self.toast_type
    }

    fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }
}

/// Short-lived notifications stacked in the bottom-right corner.
pub struct ToastManager {
    toasts: VecDeque<Toast>,
}

impl Default for ToastManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastManager {
    pub const fn new() -> Self {
        Self {
            toasts: VecDeque::new(),
        }
    }

    pub fn show(&mut self, toast: Toast) {
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_VISIBLE {
            self.toasts.pop_front();
        }
    }

    pub fn toasts(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}

impl Component for ToastManager {
    type Output = ();

    fn handle_tick(&mut self) {
        self.toasts.retain(|t| !t.is_expired());
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let toast_height = 3u16;
        let toast_width = 50u16.min(area.width.saturating_sub(4));
        let spacing = 1u16;

        for (i, toast) in (0u16..).zip(self.toasts.iter().rev()) {
            let y_offset = i * (toast_height + spacing) + toast_height + 1;
            if y_offset > area.height {
                break;
            }
            let y = area.y + area.height - y_offset;
            let x = area.x + area.width.saturating_sub(toast_width + 2);
            let toast_area = Rect::new(x, y, toast_width, toast_height);

            let (border_color, icon) = match toast.toast_type {
                ToastType::Success => (theme.success(), "✓"),
                ToastType::Info => (theme.info(), "ℹ"),
                ToastType::Error => (theme.error(), "✗"),
            };

            frame.render_widget(Clear, toast_area);

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .style(Style::default().bg(theme.surface0));

            let paragraph = Paragraph::new(format!("{icon} {}", toast.message))
                .block(block)
                .style(
                    Style::default()
                        .fg(theme.text_primary())
                        .add_modifier(Modifier::BOLD),
                )
                .alignment(Alignment::Center);

            frame.render_widget(paragraph, toast_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_latest_toasts() {
        let mut manager = ToastManager::new();
        for i in 0..5 {
            manager.show(Toast::info(format!("toast {i}")));
        }
        let messages: Vec<&str> = manager.toasts().map(Toast::message).collect();
        assert_eq!(messages, vec!["toast 2", "toast 3", "toast 4"]);
    }

    #[test]
    fn test_tick_drops_expired() {
        let mut manager = ToastManager::new();
        let mut expired = Toast::success("old");
        expired.duration = Duration::ZERO;
        manager.show(expired);
        manager.show(Toast::success("fresh"));

        manager.handle_tick();
        let messages: Vec<&str> = manager.toasts().map(Toast::message).collect();
        assert_eq!(messages, vec!["fresh"]);
    }
}
