use std::sync::Arc;

use crossterm::event::KeyEvent;

use crate::config::actions::{DialogAction, GlobalAction, NavAction, PaletteAction};
use crate::config::key::KeyBinding;
use crate::config::keybindings::KeybindingsConfig;

/// Maps key events to configured actions.
pub struct KeyResolver {
    keybindings: Arc<KeybindingsConfig>,
}

impl KeyResolver {
    pub const fn new(keybindings: Arc<KeybindingsConfig>) -> Self {
        Self { keybindings }
    }

    fn global(&self, action: GlobalAction) -> &KeyBinding {
        let kb = &self.keybindings.global;
        match action {
            GlobalAction::Quit => &kb.quit,
            GlobalAction::Help => &kb.help,
            GlobalAction::Palette => &kb.palette,
            GlobalAction::Back => &kb.back,
            GlobalAction::ToggleTheme => &kb.toggle_theme,
            GlobalAction::Suspend => &kb.suspend,
        }
    }

    fn nav(&self, action: NavAction) -> &KeyBinding {
        let kb = &self.keybindings.navigation;
        match action {
            NavAction::Up => &kb.up,
            NavAction::Down => &kb.down,
            NavAction::PageUp => &kb.page_up,
            NavAction::PageDown => &kb.page_down,
            NavAction::Home => &kb.home,
            NavAction::End => &kb.end,
            NavAction::Select => &kb.select,
        }
    }

    fn palette(&self, action: PaletteAction) -> &KeyBinding {
        let kb = &self.keybindings.palette;
        match action {
            PaletteAction::Next => &kb.next,
            PaletteAction::Previous => &kb.previous,
            PaletteAction::Execute => &kb.execute,
            PaletteAction::Close => &kb.close,
        }
    }

    pub fn matches_global(&self, event: &KeyEvent, action: GlobalAction) -> bool {
        self.global(action).matches(event)
    }

    pub fn display_global(&self, action: GlobalAction) -> String {
        self.global(action).display()
    }

    pub fn matches_nav(&self, event: &KeyEvent, action: NavAction) -> bool {
        self.nav(action).matches(event)
    }

    pub fn display_nav(&self, action: NavAction) -> String {
        self.nav(action).display()
    }

    pub fn matches_palette(&self, event: &KeyEvent, action: PaletteAction) -> bool {
        self.palette(action).matches(event)
    }

    pub fn display_palette(&self, action: PaletteAction) -> String {
        self.palette(action).display()
    }

    fn dialog(&self, action: DialogAction) -> &KeyBinding {
        let kb = &self.keybindings.dialog;
        match action {
            DialogAction::Dismiss => &kb.dismiss,
        }
    }

    pub fn matches_dialog(&self, event: &KeyEvent, action: DialogAction) -> bool {
        self.dialog(action).matches(event)
    }

    pub fn display_dialog(&self, action: DialogAction) -> String {
        self.dialog(action).display()
    }
}

impl Default for KeyResolver {
    fn default() -> Self {
        Self::new(Arc::new(KeybindingsConfig::default()))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;

    #[test]
    fn test_default_palette_shortcut() {
        let resolver = KeyResolver::default();
        let ctrl_k = KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL);
        assert!(resolver.matches_global(&ctrl_k, GlobalAction::Palette));
        assert!(!resolver.matches_nav(&ctrl_k, NavAction::Up));
        assert_eq!(resolver.display_global(GlobalAction::Palette), "ctrl+k");
    }

    #[test]
    fn test_nav_display_joins_alternatives() {
        let resolver = KeyResolver::default();
        assert_eq!(resolver.display_nav(NavAction::Down), "j/Down");
    }

    #[test]
    fn test_palette_keys() {
        let resolver = KeyResolver::default();
        let ctrl_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::CONTROL);
        let plain_n = KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE);
        assert!(resolver.matches_palette(&ctrl_n, PaletteAction::Next));
        assert!(!resolver.matches_palette(&plain_n, PaletteAction::Next));
    }
}
