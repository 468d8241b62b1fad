//! Command palette action registry.
//!
//! The registry is an ordered, immutable list of [`Action`]s built once at
//! startup and shared with the palette and the app. Grouping by [`Section`]
//! is derived on demand and never stored.

use std::fmt;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::handler::{HandlerId, HandlerRegistry, THEME_DARK, THEME_LIGHT};

/// Palette group. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Section {
    Navigation,
    Socials,
    Themes,
}

impl Section {
    pub const ALL: [Self; 3] = [Self::Navigation, Self::Socials, Self::Themes];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Socials => "Socials",
            Self::Themes => "Themes",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What selecting an action does.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionKind {
    /// Go to an internal path or external URL.
    Navigate { href: String },
    /// Run a registered handler.
    Invoke { handler: HandlerId },
    /// Placeholder with no effect.
    #[default]
    Inert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    /// Key names of a chorded shortcut, in press order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortcut: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    pub section: Section,
    #[serde(default)]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<String>,
}

impl Action {
    /// An inert action. Chain `navigate` or `invoke` to make it do something.
    pub fn new(name: impl Into<String>, section: Section) -> Self {
        Self {
            name: name.into(),
            shortcut: None,
            keywords: None,
            section,
            kind: ActionKind::Inert,
            subtitle: None,
            icon: None,
            color: None,
            icon_color: None,
        }
    }

    pub fn navigate(mut self, href: impl Into<String>) -> Self {
        self.kind = ActionKind::Navigate { href: href.into() };
        self
    }

    pub fn invoke(mut self, handler: impl Into<HandlerId>) -> Self {
        self.kind = ActionKind::Invoke {
            handler: handler.into(),
        };
        self
    }

    pub fn keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub fn shortcut(mut self, keys: &[&str]) -> Self {
        self.shortcut = Some(keys.iter().map(ToString::to_string).collect());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn icon_color(mut self, color: impl Into<String>) -> Self {
        self.icon_color = Some(color.into());
        self
    }

    pub fn href(&self) -> Option<&str> {
        match &self.kind {
            ActionKind::Navigate { href } => Some(href),
            _ => None,
        }
    }

    /// Handler run on selection, if any.
    pub fn perform(&self) -> Option<&HandlerId> {
        match &self.kind {
            ActionKind::Invoke { handler } => Some(handler),
            _ => None,
        }
    }

    pub const fn is_actionable(&self) -> bool {
        !matches!(self.kind, ActionKind::Inert)
    }

    /// Texts the palette query is matched against.
    pub fn search_texts(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.keywords.as_deref())
    }
}

/// Ordered, read-only set of palette actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionRegistry {
    actions: Vec<Action>,
}

impl ActionRegistry {
    /// The site's navigation and theme actions.
    pub fn builtin() -> Self {
        let mut actions = builtin_navigation();
        actions.extend(builtin_themes());
        Self { actions }
    }

    /// Builtin actions followed by `extra`, in the given order.
    pub fn with_actions(extra: impl IntoIterator<Item = Action>) -> Self {
        let mut registry = Self::builtin();
        registry.actions.extend(extra);
        registry
    }

    /// Every action in declared order.
    pub fn list_actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn by_section(&self, section: Section) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(move |a| a.section == section)
    }

    pub fn navigation(&self) -> Vec<&Action> {
        self.by_section(Section::Navigation).collect()
    }

    pub fn themes(&self) -> Vec<&Action> {
        self.by_section(Section::Themes).collect()
    }

    /// Actions partitioned by section in display order. Empty sections are
    /// omitted.
    pub fn grouped(&self) -> Vec<(Section, Vec<&Action>)> {
        Section::ALL
            .into_iter()
            .map(|section| (section, self.by_section(section).collect::<Vec<_>>()))
            .filter(|(_, actions)| !actions.is_empty())
            .collect()
    }

    pub fn find(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Check that every invocable action names a registered handler.
    pub fn validate(&self, handlers: &HandlerRegistry) -> Result<()> {
        for action in &self.actions {
            if let Some(id) = action.perform()
                && !handlers.contains(id)
            {
                return Err(eyre!(
                    "Action `{}` references unknown handler `{id}` (known: {})",
                    action.name,
                    handlers
                        .ids()
                        .iter()
                        .map(HandlerId::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_navigation() -> Vec<Action> {
    vec![
        Action::new("Home", Section::Navigation)
            .keywords("home")
            .navigate("/")
            .color("#EC605A")
            .icon_color("#7C3AED"),
        Action::new("Writing", Section::Navigation)
            .keywords("writing")
            .navigate("/writing")
            .color("#F7D358")
            .icon_color("#7C3AED"),
    ]
}

fn builtin_themes() -> Vec<Action> {
    vec![
        Action::new("Light", Section::Themes)
            .keywords("light")
            .invoke(THEME_LIGHT)
            .color("#EC79F9")
            .icon_color("#7C3AED"),
        Action::new("Dark", Section::Themes)
            .keywords("dark")
            .invoke(THEME_DARK)
            .color("#EC79F9")
            .icon_color("#7C3AED"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names<'a>(actions: impl IntoIterator<Item = &'a Action>) -> Vec<&'a str> {
        actions.into_iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn test_every_action_has_a_known_section() {
        let registry = ActionRegistry::builtin();
        assert!(!registry.list_actions().is_empty());
        for action in registry.list_actions() {
            assert!(Section::ALL.contains(&action.section));
        }
    }

    #[test]
    fn test_navigation_section() {
        let registry = ActionRegistry::builtin();
        let navigation = registry.navigation();
        assert_eq!(names(navigation.iter().copied()), vec!["Home", "Writing"]);
        assert_eq!(navigation[0].href(), Some("/"));
        assert_eq!(navigation[1].href(), Some("/writing"));
    }

    #[test]
    fn test_themes_section_has_no_links() {
        let registry = ActionRegistry::builtin();
        let themes = registry.themes();
        assert_eq!(names(themes.iter().copied()), vec!["Light", "Dark"]);
        assert!(themes.iter().all(|a| a.href().is_none()));
        assert_eq!(themes[0].perform(), Some(&HandlerId::new(THEME_LIGHT)));
        assert_eq!(themes[1].perform(), Some(&HandlerId::new(THEME_DARK)));
    }

    #[test]
    fn test_home_entry() {
        let registry = ActionRegistry::builtin();
        let home = registry.find("Home").unwrap();
        assert_eq!(home.href(), Some("/"));
        assert_eq!(home.section, Section::Navigation);
    }

    #[test]
    fn test_list_actions_is_stable() {
        let registry = ActionRegistry::builtin();
        let first = registry.list_actions().to_vec();
        let second = registry.list_actions().to_vec();
        assert_eq!(first, second);
        assert_eq!(ActionRegistry::builtin(), ActionRegistry::builtin());
    }

    #[test]
    fn test_no_action_both_navigates_and_performs() {
        let registry = ActionRegistry::builtin();
        for action in registry.list_actions() {
            assert!(!(action.href().is_some() && action.perform().is_some()));
        }
    }

    #[test]
    fn test_grouped_preserves_order_and_skips_empty() {
        let registry = ActionRegistry::with_actions([
            Action::new("GitHub", Section::Socials).navigate("https://github.com/ryanwaits"),
            Action::new("Later", Section::Navigation),
        ]);
        let grouped = registry.grouped();
        let sections: Vec<Section> = grouped.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            sections,
            vec![Section::Navigation, Section::Socials, Section::Themes]
        );
        assert_eq!(
            names(grouped[0].1.iter().copied()),
            vec!["Home", "Writing", "Later"]
        );

        let builtin_sections: Vec<Section> = ActionRegistry::builtin()
            .grouped()
            .iter()
            .map(|(s, _)| *s)
            .collect();
        assert_eq!(builtin_sections, vec![Section::Navigation, Section::Themes]);
    }

    #[test]
    fn test_inert_actions_are_not_actionable() {
        let action = Action::new("Soon", Section::Navigation);
        assert!(!action.is_actionable());
        assert!(action.href().is_none());
        assert!(action.perform().is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_handlers() {
        let handlers = HandlerRegistry::builtin();
        assert!(ActionRegistry::builtin().validate(&handlers).is_ok());

        let registry = ActionRegistry::with_actions([
            Action::new("Sepia", Section::Themes).invoke("theme.sepia"),
        ]);
        let err = registry.validate(&handlers).unwrap_err().to_string();
        assert!(err.contains("theme.sepia"));
        assert!(err.contains("Sepia"));
    }

    #[test]
    fn test_json_shape() {
        let registry = ActionRegistry::builtin();
        let value = serde_json::to_value(&registry).unwrap();
        let first = &value[0];
        assert_eq!(first["name"], "Home");
        assert_eq!(first["section"], "Navigation");
        assert_eq!(first["kind"]["type"], "navigate");
        assert_eq!(first["kind"]["href"], "/");
        assert_eq!(value[2]["kind"]["type"], "invoke");
        assert_eq!(value[2]["kind"]["handler"], "theme.light");
        assert!(first.get("subtitle").is_none());
    }

    #[test]
    fn test_action_from_toml_defaults_to_inert() {
        let action: Action = toml::from_str(
            r#"
            name = "Placeholder"
            section = "Socials"
            "#,
        )
        .unwrap();
        assert_eq!(action.kind, ActionKind::Inert);
        assert_eq!(action.section, Section::Socials);
    }

    #[test]
    fn test_search_texts_include_keywords() {
        let action = Action::new("Home", Section::Navigation).keywords("start index");
        let texts: Vec<&str> = action.search_texts().collect();
        assert_eq!(texts, vec!["Home", "start index"]);
    }
}
