use std::fmt;
use std::str::FromStr;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single key press with modifiers, written as `ctrl+k`, `Esc`, `?`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Key {
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub const fn with_ctrl(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::CONTROL,
        }
    }

    pub const fn with_alt(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::ALT,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match (self.code, event.code) {
            // Terminals disagree on whether shifted characters carry SHIFT,
            // so compare characters case-insensitively and ignore SHIFT.
            (KeyCode::Char(a), KeyCode::Char(b)) => {
                let same_char = if a.is_ascii_alphabetic() && b.is_ascii_alphabetic() {
                    a == b || (a.eq_ignore_ascii_case(&b) && self.shift_of(a) == shift_of(event, b))
                } else {
                    a == b
                };
                same_char
                    && (self.modifiers - KeyModifiers::SHIFT)
                        == (event.modifiers - KeyModifiers::SHIFT)
            }
            _ => self.code == event.code && self.modifiers == event.modifiers,
        }
    }

    fn shift_of(&self, c: char) -> bool {
        c.is_ascii_uppercase() || self.modifiers.contains(KeyModifiers::SHIFT)
    }

    fn code_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::F(n) => format!("F{n}"),
            _ => "?".to_string(),
        }
    }
}

fn shift_of(event: &KeyEvent, c: char) -> bool {
    c.is_ascii_uppercase() || event.modifiers.contains(KeyModifiers::SHIFT)
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            f.write_str("ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            f.write_str("alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            f.write_str("shift+")?;
        }
        f.write_str(&self.code_name())
    }
}

impl FromStr for Key {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty key".to_string());
        }

        // A lone "+" is the plus key, not a separator.
        let (modifier_parts, key_part) = match s.rsplit_once('+') {
            Some((mods, key)) if !key.is_empty() => (Some(mods), key),
            Some((mods, _)) if mods.ends_with('+') => (Some(&mods[..mods.len() - 1]), "+"),
            _ => (None, s),
        };

        let mut modifiers = KeyModifiers::NONE;
        for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers |= KeyModifiers::CONTROL,
                "alt" | "option" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                "" => {}
                _ => return Err(format!("Unknown modifier: {part}")),
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "space" => KeyCode::Char(' '),
            lower if lower.len() > 1 && lower.starts_with('f') => {
                let num: u8 = lower[1..]
                    .parse()
                    .map_err(|_| format!("Invalid function key: {key_part}"))?;
                KeyCode::F(num)
            }
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    // Keep the original case so `G` and `g` stay distinct.
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return Err(format!("Unknown key: {key_part}")),
                }
            }
        };

        Ok(Self { code, modifiers })
    }
}

impl Serialize for Key {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Key {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// One or more keys bound to the same action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyBinding {
    Single(Key),
    Multiple(Vec<Key>),
}

impl KeyBinding {
    pub const fn single(key: Key) -> Self {
        Self::Single(key)
    }

    pub const fn multiple(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        match self {
            Self::Single(key) => key.matches(event),
            Self::Multiple(keys) => keys.iter().any(|k| k.matches(event)),
        }
    }

    pub fn display(&self) -> String {
        match self {
            Self::Single(key) => key.to_string(),
            Self::Multiple(keys) => keys
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("/"),
        }
    }
}

impl From<Key> for KeyBinding {
    fn from(key: Key) -> Self {
        Self::Single(key)
    }
}

impl From<Vec<Key>> for KeyBinding {
    fn from(keys: Vec<Key>) -> Self {
        Self::Multiple(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_parsing() {
        assert_eq!(Key::from_str("q").unwrap(), Key::new(KeyCode::Char('q')));
        assert_eq!(Key::from_str("Enter").unwrap(), Key::new(KeyCode::Enter));
        assert_eq!(Key::from_str("esc").unwrap(), Key::new(KeyCode::Esc));
        assert_eq!(
            Key::from_str("ctrl+k").unwrap(),
            Key::with_ctrl(KeyCode::Char('k'))
        );
        assert_eq!(
            Key::from_str("cmd+k").unwrap(),
            Key::with_ctrl(KeyCode::Char('k'))
        );
        assert_eq!(Key::from_str("F1").unwrap(), Key::new(KeyCode::F(1)));
        assert_eq!(Key::from_str("+").unwrap(), Key::new(KeyCode::Char('+')));
        assert_eq!(
            Key::from_str("ctrl++").unwrap(),
            Key::with_ctrl(KeyCode::Char('+'))
        );
        assert_eq!(Key::from_str("G").unwrap(), Key::new(KeyCode::Char('G')));
    }

    #[test]
    fn test_key_parsing_errors() {
        assert!(Key::from_str("").is_err());
        assert!(Key::from_str("hyper+k").is_err());
        assert!(Key::from_str("banana").is_err());
        assert!(Key::from_str("fx").is_err());
    }

    #[test]
    fn test_key_display() {
        assert_eq!(Key::new(KeyCode::Char('q')).to_string(), "q");
        assert_eq!(Key::new(KeyCode::Enter).to_string(), "Enter");
        assert_eq!(Key::with_ctrl(KeyCode::Char('k')).to_string(), "ctrl+k");
        assert_eq!(Key::with_alt(KeyCode::Backspace).to_string(), "alt+Backspace");
    }

    #[test]
    fn test_key_matches() {
        let key = Key::new(KeyCode::Char('q'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));

        let palette = Key::with_ctrl(KeyCode::Char('k'));
        assert!(palette.matches(&KeyEvent::new(KeyCode::Char('k'), KeyModifiers::CONTROL)));
        assert!(!palette.matches(&KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_uppercase_key() {
        let key = Key::new(KeyCode::Char('G'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('G'), KeyModifiers::NONE)));
        assert!(!key.matches(&KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_symbol_key_ignores_shift() {
        let key = Key::new(KeyCode::Char('?'));
        assert!(key.matches(&KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT)));
    }

    #[test]
    fn test_binding_serde() {
        #[derive(Deserialize)]
        struct Wrapper {
            binding: KeyBinding,
        }

        let single: Wrapper = toml::from_str(r#"binding = "ctrl+k""#).unwrap();
        assert_eq!(single.binding, Key::with_ctrl(KeyCode::Char('k')).into());

        let multiple: Wrapper = toml::from_str(r#"binding = ["j", "Down"]"#).unwrap();
        assert_eq!(multiple.binding.display(), "j/Down");
        assert!(
            multiple
                .binding
                .matches(&KeyEvent::new(KeyCode::Down, KeyModifiers::NONE))
        );
    }
}
