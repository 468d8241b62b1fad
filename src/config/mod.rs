pub mod actions;
pub mod key;
pub mod keybindings;
pub mod loader;
pub mod resolver;

pub use actions::*;
use keybindings::KeybindingsConfig;
pub use loader::{config_path, load_from, save_theme_mode};
pub use resolver::KeyResolver;
use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::site::{BlogConfig, SiteConfig};
use crate::theme::ThemeMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(default)]
    pub mode: ThemeMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub blog: BlogConfig,
    /// Extra palette actions appended after the builtin ones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
}
