use crossterm::event::KeyCode;
use serde::{Deserialize, Serialize};

use crate::config::key::{Key, KeyBinding};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalKeybindings {
    pub quit: KeyBinding,
    pub help: KeyBinding,
    pub palette: KeyBinding,
    pub back: KeyBinding,
    pub toggle_theme: KeyBinding,
    pub suspend: KeyBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationKeybindings {
    pub up: KeyBinding,
    pub down: KeyBinding,
    pub page_up: KeyBinding,
    pub page_down: KeyBinding,
    pub home: KeyBinding,
    pub end: KeyBinding,
    pub select: KeyBinding,
}

/// Keys active while the command palette is open. Plain characters always go
/// to the query, so these should carry a modifier or be non-printable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteKeybindings {
    pub next: KeyBinding,
    pub previous: KeyBinding,
    pub execute: KeyBinding,
    pub close: KeyBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogKeybindings {
    pub dismiss: KeyBinding,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct KeybindingsConfig {
    pub global: GlobalKeybindings,
    pub navigation: NavigationKeybindings,
    pub palette: PaletteKeybindings,
    pub dialog: DialogKeybindings,
}

impl Default for GlobalKeybindings {
    fn default() -> Self {
        Self {
            quit: Key::new(KeyCode::Char('q')).into(),
            help: Key::new(KeyCode::Char('?')).into(),
            palette: Key::with_ctrl(KeyCode::Char('k')).into(),
            back: Key::new(KeyCode::Esc).into(),
            toggle_theme: Key::new(KeyCode::Char('t')).into(),
            suspend: Key::with_ctrl(KeyCode::Char('z')).into(),
        }
    }
}

impl Default for NavigationKeybindings {
    fn default() -> Self {
        Self {
            up: KeyBinding::multiple(vec![Key::new(KeyCode::Char('k')), Key::new(KeyCode::Up)]),
            down: KeyBinding::multiple(vec![Key::new(KeyCode::Char('j')), Key::new(KeyCode::Down)]),
            page_up: Key::new(KeyCode::PageUp).into(),
            page_down: Key::new(KeyCode::PageDown).into(),
            home: KeyBinding::multiple(vec![Key::new(KeyCode::Char('g')), Key::new(KeyCode::Home)]),
            end: KeyBinding::multiple(vec![Key::new(KeyCode::Char('G')), Key::new(KeyCode::End)]),
            select: Key::new(KeyCode::Enter).into(),
        }
    }
}

impl Default for PaletteKeybindings {
    fn default() -> Self {
        Self {
            next: KeyBinding::multiple(vec![
                Key::new(KeyCode::Down),
                Key::with_ctrl(KeyCode::Char('n')),
            ]),
            previous: KeyBinding::multiple(vec![
                Key::new(KeyCode::Up),
                Key::with_ctrl(KeyCode::Char('p')),
            ]),
            execute: Key::new(KeyCode::Enter).into(),
            close: Key::new(KeyCode::Esc).into(),
        }
    }
}

impl Default for DialogKeybindings {
    fn default() -> Self {
        Self {
            dismiss: KeyBinding::multiple(vec![
                Key::new(KeyCode::Enter),
                Key::new(KeyCode::Esc),
                Key::new(KeyCode::Char('q')),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: KeybindingsConfig = toml::from_str(
            r#"
            [global]
            palette = "ctrl+p"
            "#,
        )
        .unwrap();
        assert_eq!(config.global.palette, Key::with_ctrl(KeyCode::Char('p')).into());
        assert_eq!(config.global.quit, GlobalKeybindings::default().quit);
        assert_eq!(config.navigation, NavigationKeybindings::default());
    }

    #[test]
    fn test_defaults_roundtrip_through_toml() {
        let config = KeybindingsConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: KeybindingsConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
