use std::fmt;

use catppuccin::PALETTE;
use clap::ValueEnum;
use ratatui::style::Color;
use ratatui::widgets::BorderType;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Convert a catppuccin color to a ratatui color.
const fn catppuccin_to_color(c: &catppuccin::Color) -> Color {
    Color::Rgb(c.rgb.r, c.rgb.g, c.rgb.b)
}

/// Requested color scheme.
///
/// `System` defers to the terminal host's preference and is resolved to
/// `Light` or `Dark` once, when the appearance is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    /// Resolve `System` into a concrete mode. Detection failures fall back to dark.
    pub fn resolve(self) -> Self {
        match self {
            Self::Light | Self::Dark => self,
            Self::System => match dark_light::detect() {
                Ok(dark_light::Mode::Light) => Self::Light,
                Ok(dark_light::Mode::Dark | dark_light::Mode::Unspecified) => Self::Dark,
                Err(e) => {
                    debug!("Could not detect system color scheme: {e}");
                    Self::Dark
                }
            },
        }
    }

    /// Name used in the config file and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::System => "System",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Palette used by every page and overlay.
///
/// Light maps to Catppuccin Latte and Dark to Catppuccin Mocha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub base: Color,
    pub mantle: Color,
    pub surface0: Color,
    pub surface1: Color,
    pub surface2: Color,
    pub overlay0: Color,
    pub overlay1: Color,
    pub text: Color,
    pub subtext0: Color,
    pub subtext1: Color,
    pub mauve: Color,
    pub red: Color,
    pub peach: Color,
    pub yellow: Color,
    pub green: Color,
    pub sky: Color,
    pub blue: Color,
    pub lavender: Color,
    pub border_type: BorderType,
}

impl Theme {
    const fn from_catppuccin(flavor: &catppuccin::Flavor) -> Self {
        let c = &flavor.colors;
        Self {
            base: catppuccin_to_color(&c.base),
            mantle: catppuccin_to_color(&c.mantle),
            surface0: catppuccin_to_color(&c.surface0),
            surface1: catppuccin_to_color(&c.surface1),
            surface2: catppuccin_to_color(&c.surface2),
            overlay0: catppuccin_to_color(&c.overlay0),
            overlay1: catppuccin_to_color(&c.overlay1),
            text: catppuccin_to_color(&c.text),
            subtext0: catppuccin_to_color(&c.subtext0),
            subtext1: catppuccin_to_color(&c.subtext1),
            mauve: catppuccin_to_color(&c.mauve),
            red: catppuccin_to_color(&c.red),
            peach: catppuccin_to_color(&c.peach),
            yellow: catppuccin_to_color(&c.yellow),
            green: catppuccin_to_color(&c.green),
            sky: catppuccin_to_color(&c.sky),
            blue: catppuccin_to_color(&c.blue),
            lavender: catppuccin_to_color(&c.lavender),
            border_type: BorderType::Rounded,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self::from_catppuccin(&PALETTE.latte)
    }

    #[must_use]
    pub fn dark() -> Self {
        Self::from_catppuccin(&PALETTE.mocha)
    }

    /// Theme for a mode. `System` is resolved first.
    #[must_use]
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode.resolve() {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark | ThemeMode::System => Self::dark(),
        }
    }

    // Text tiers, mirroring the primary/secondary/tertiary/quaternary text
    // classes of the web site.
    #[must_use]
    pub const fn text_primary(&self) -> Color {
        self.text
    }

    #[must_use]
    pub const fn text_secondary(&self) -> Color {
        self.subtext1
    }

    #[must_use]
    pub const fn text_tertiary(&self) -> Color {
        self.subtext0
    }

    #[must_use]
    pub const fn text_quaternary(&self) -> Color {
        self.overlay1
    }

    #[must_use]
    pub const fn muted(&self) -> Color {
        self.overlay0
    }

    #[must_use]
    pub const fn accent(&self) -> Color {
        self.mauve
    }

    #[must_use]
    pub const fn link(&self) -> Color {
        self.blue
    }

    #[must_use]
    pub const fn key_hint(&self) -> Color {
        self.peach
    }

    #[must_use]
    pub const fn success(&self) -> Color {
        self.green
    }

    #[must_use]
    pub const fn error(&self) -> Color {
        self.red
    }

    #[must_use]
    pub const fn info(&self) -> Color {
        self.sky
    }

    #[must_use]
    pub const fn border(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn border_focused(&self) -> Color {
        self.lavender
    }

    #[must_use]
    pub const fn selection_bg(&self) -> Color {
        self.surface1
    }

    #[must_use]
    pub const fn header(&self) -> Color {
        self.yellow
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

/// Process-wide appearance state. Theme handlers are the only writers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    mode: ThemeMode,
    theme: Theme,
}

impl Appearance {
    pub fn new(mode: ThemeMode) -> Self {
        let mode = mode.resolve();
        Self {
            mode,
            theme: Theme::for_mode(mode),
        }
    }

    /// Concrete mode in effect, never `System`.
    pub const fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        *self = Self::new(mode);
    }
}

/// Parse a `#RRGGBB` string into a terminal color.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::Rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
