//! Named side effects that palette actions can invoke.
//!
//! Actions never carry closures. An invocable action names a [`HandlerId`],
//! and the [`HandlerRegistry`] maps that id to the code that runs. This keeps
//! the action list plain data while the behaviour lives here.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::site::BlogConfig;
use crate::theme::{Appearance, ThemeMode};

pub const THEME_LIGHT: &str = "theme.light";
pub const THEME_DARK: &str = "theme.dark";

/// Identifier of a registered handler, e.g. `theme.light`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandlerId(String);

impl HandlerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for HandlerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// State a handler is allowed to touch.
pub struct HandlerContext<'a> {
    pub appearance: &'a mut Appearance,
    pub blog: &'a BlogConfig,
}

/// A side-effecting operation bound to a [`HandlerId`].
///
/// Handlers own their error reporting: the registry hands any error straight
/// back to the caller.
pub trait Handler: Send + Sync {
    fn id(&self) -> HandlerId;

    /// Short description for logs and help.
    fn description(&self) -> &'static str {
        ""
    }

    /// Run the side effect.
    fn perform(&self, ctx: &mut HandlerContext<'_>) -> Result<()>;
}

/// Switches the process-wide color scheme.
pub struct SetThemeHandler {
    mode: ThemeMode,
}

impl SetThemeHandler {
    pub const fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }
}

impl Handler for SetThemeHandler {
    fn id(&self) -> HandlerId {
        match self.mode {
            ThemeMode::Light => THEME_LIGHT.into(),
            ThemeMode::Dark => THEME_DARK.into(),
            ThemeMode::System => "theme.system".into(),
        }
    }

    fn description(&self) -> &'static str {
        match self.mode {
            ThemeMode::Light => "Switch to the light theme",
            ThemeMode::Dark => "Switch to the dark theme",
            ThemeMode::System => "Follow the system theme",
        }
    }

    fn perform(&self, ctx: &mut HandlerContext<'_>) -> Result<()> {
        let mut mode = self.mode.resolve();
        if mode == ThemeMode::Dark && !ctx.blog.dark_mode {
            warn!("Dark mode is disabled in the blog config, staying on the light theme");
            mode = ThemeMode::Light;
        }
        debug!("Setting theme mode to {mode}");
        ctx.appearance.set_mode(mode);
        Ok(())
    }
}

/// Dispatch table from handler ids to handlers.
pub struct HandlerRegistry {
    handlers: HashMap<HandlerId, Arc<dyn Handler>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with the handlers the builtin actions reference.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(SetThemeHandler::new(ThemeMode::Light));
        registry.register(SetThemeHandler::new(ThemeMode::Dark));
        registry
    }

    /// Register a handler, replacing any previous handler with the same id.
    pub fn register<H: Handler + 'static>(&mut self, handler: H) {
        let id = handler.id();
        self.handlers.insert(id, Arc::new(handler));
    }

    pub fn get(&self, id: &HandlerId) -> Option<Arc<dyn Handler>> {
        self.handlers.get(id).cloned()
    }

    pub fn contains(&self, id: &HandlerId) -> bool {
        self.handlers.contains_key(id)
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> Vec<HandlerId> {
        let mut ids: Vec<HandlerId> = self.handlers.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Look up `id` and run its handler.
    pub fn dispatch(&self, id: &HandlerId, ctx: &mut HandlerContext<'_>) -> Result<()> {
        let handler = self
            .get(id)
            .ok_or_else(|| eyre!("No handler registered for `{id}`"))?;
        debug!("Invoking handler {id}: {}", handler.description());
        handler.perform(ctx)
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingHandler;

    impl Handler for FailingHandler {
        fn id(&self) -> HandlerId {
            "test.fail".into()
        }

        fn perform(&self, _ctx: &mut HandlerContext<'_>) -> Result<()> {
            Err(eyre!("boom"))
        }
    }

    #[test]
    fn test_builtin_registers_theme_handlers() {
        let registry = HandlerRegistry::builtin();
        assert_eq!(registry.len(), 2);
        assert_eq!(
            registry.ids(),
            vec![HandlerId::new(THEME_DARK), HandlerId::new(THEME_LIGHT)]
        );
        let light = registry.get(&THEME_LIGHT.into()).unwrap();
        assert_eq!(light.description(), "Switch to the light theme");
        assert_eq!(FailingHandler.description(), "");
    }

    #[test]
    fn test_dispatch_switches_theme() {
        let registry = HandlerRegistry::builtin();
        let blog = BlogConfig::default();
        let mut appearance = Appearance::new(ThemeMode::Dark);

        let mut ctx = HandlerContext {
            appearance: &mut appearance,
            blog: &blog,
        };
        registry.dispatch(&THEME_LIGHT.into(), &mut ctx).unwrap();
        assert_eq!(appearance.mode(), ThemeMode::Light);

        let mut ctx = HandlerContext {
            appearance: &mut appearance,
            blog: &blog,
        };
        registry.dispatch(&THEME_DARK.into(), &mut ctx).unwrap();
        assert_eq!(appearance.mode(), ThemeMode::Dark);
    }

    #[test]
    fn test_dark_handler_respects_disabled_dark_mode() {
        let registry = HandlerRegistry::builtin();
        let blog = BlogConfig {
            dark_mode: false,
            ..BlogConfig::default()
        };
        let mut appearance = Appearance::new(ThemeMode::Light);
        let mut ctx = HandlerContext {
            appearance: &mut appearance,
            blog: &blog,
        };
        registry.dispatch(&THEME_DARK.into(), &mut ctx).unwrap();
        assert_eq!(appearance.mode(), ThemeMode::Light);
    }

    #[test]
    fn test_unknown_handler_is_an_error() {
        let registry = HandlerRegistry::builtin();
        let blog = BlogConfig::default();
        let mut appearance = Appearance::new(ThemeMode::Dark);
        let mut ctx = HandlerContext {
            appearance: &mut appearance,
            blog: &blog,
        };
        let err = registry
            .dispatch(&"nope".into(), &mut ctx)
            .unwrap_err()
            .to_string();
        assert!(err.contains("nope"));
    }

    #[test]
    fn test_handler_errors_propagate() {
        let mut registry = HandlerRegistry::new();
        registry.register(FailingHandler);
        assert!(registry.contains(&"test.fail".into()));

        let blog = BlogConfig::default();
        let mut appearance = Appearance::new(ThemeMode::Dark);
        let mut ctx = HandlerContext {
            appearance: &mut appearance,
            blog: &blog,
        };
        assert!(registry.dispatch(&"test.fail".into(), &mut ctx).is_err());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = HandlerRegistry::new();
        registry.register(SetThemeHandler::new(ThemeMode::Light));
        registry.register(SetThemeHandler::new(ThemeMode::Light));
        assert_eq!(registry.len(), 1);
    }
}
