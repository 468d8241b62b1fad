mod error_dialog;
mod help;
mod list;
mod palette;
mod query_input;
mod status_bar;
mod toast;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;

pub use color_eyre::Result;

use crate::Theme;

pub use error_dialog::{ErrorDialog, ErrorDialogEvent};
pub use help::{HelpEvent, HelpOverlay};
pub use list::{List, ListEvent, ListRow};
pub use palette::{CommandPalette, PaletteEvent};
pub use query_input::QueryInput;
pub use status_bar::StatusBar;
pub use toast::{Toast, ToastManager, ToastType};

/// Result of handling an input event.
///
/// - `Ignored` - The handler didn't recognize this input, the parent should process it
/// - `Consumed` - The input was handled but produced no event
/// - `Event(E)` - The input was handled and produced an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult<E> {
    Ignored,
    Consumed,
    Event(E),
}

impl<E> EventResult<E> {
    pub const fn is_consumed(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

impl<E> From<E> for EventResult<E> {
    fn from(event: E) -> Self {
        Self::Event(event)
    }
}

/// Interactive UI building block.
///
/// Components handle key events and emit generic outputs. They know nothing
/// about routes or handlers.
pub trait Component {
    type Output;

    /// Handle a key event.
    ///
    /// Returns `Err(...)` if an error occurred during handling.
    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    /// Called on each tick for time-based updates.
    fn handle_tick(&mut self) {}

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);
}

/// A key and what it does, for the help overlay and status bar hints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keybinding {
    pub key: String,
    pub description: String,
    /// Whether this keybinding is also shown in the status bar.
    pub hint: bool,
}

impl Keybinding {
    pub fn new(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            hint: false,
        }
    }

    pub fn hint(key: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            hint: true,
        }
    }
}

pub struct KeybindingSection {
    pub title: String,
    pub keybindings: Vec<Keybinding>,
}

impl KeybindingSection {
    pub fn new(title: impl Into<String>, keybindings: Vec<Keybinding>) -> Self {
        Self {
            title: title.into(),
            keybindings,
        }
    }
}

/// Truncate to `max_width` characters, ending in "..." when cut.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width > 3 {
        let kept: String = s.chars().take(max_width - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_width).collect()
    }
}
