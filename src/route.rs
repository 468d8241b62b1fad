use std::fmt;

use clap::ValueEnum;

use crate::action::{Action, ActionKind};
use crate::handler::HandlerId;

/// Internal page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Writing,
    /// Unknown internal path, rendered as a 404 page.
    NotFound(String),
}

impl Route {
    /// Map an internal path to a route. Trailing slashes, query strings and
    /// fragments are ignored.
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Self::Home,
            "/writing" => Self::Writing,
            _ => Self::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::Home => "/",
            Self::Writing => "/writing",
            Self::NotFound(path) => path,
        }
    }

    pub const fn title(&self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Writing => "Writing",
            Self::NotFound(_) => "Not Found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Page to open on startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StartPage {
    Home,
    Writing,
}

impl From<StartPage> for Route {
    fn from(page: StartPage) -> Self {
        match page {
            StartPage::Home => Self::Home,
            StartPage::Writing => Self::Writing,
        }
    }
}

/// Outcome of selecting an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Navigate(Route),
    /// Link that leaves the site.
    External(String),
    Invoke(HandlerId),
    Inert,
}

const EXTERNAL_SCHEMES: [&str; 3] = ["http://", "https://", "mailto:"];

pub fn is_external(href: &str) -> bool {
    EXTERNAL_SCHEMES.iter().any(|scheme| {
        href.get(..scheme.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(scheme))
    })
}

pub fn resolve(action: &Action) -> Selection {
    match &action.kind {
        ActionKind::Navigate { href } if is_external(href) => Selection::External(href.clone()),
        ActionKind::Navigate { href } if href.starts_with('/') => {
            Selection::Navigate(Route::from_path(href))
        }
        // Relative paths are resolved against the site root.
        ActionKind::Navigate { href } => Selection::Navigate(Route::from_path(&format!("/{href}"))),
        ActionKind::Invoke { handler } => Selection::Invoke(handler.clone()),
        ActionKind::Inert => Selection::Inert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionRegistry, Section};
    use crate::handler::THEME_DARK;

    #[test]
    fn test_from_path() {
        assert_eq!(Route::from_path("/"), Route::Home);
        assert_eq!(Route::from_path(""), Route::Home);
        assert_eq!(Route::from_path("/writing"), Route::Writing);
        assert_eq!(Route::from_path("/writing/"), Route::Writing);
        assert_eq!(Route::from_path("/writing?page=2"), Route::Writing);
        assert_eq!(Route::from_path("/#top"), Route::Home);
        assert_eq!(
            Route::from_path("/uses"),
            Route::NotFound("/uses".to_string())
        );
    }

    #[test]
    fn test_path_roundtrip_for_known_routes() {
        for route in [Route::Home, Route::Writing] {
            assert_eq!(Route::from_path(route.path()), route);
        }
    }

    #[test]
    fn test_resolve_builtin_actions() {
        let registry = ActionRegistry::builtin();
        assert_eq!(
            resolve(registry.find("Home").unwrap()),
            Selection::Navigate(Route::Home)
        );
        assert_eq!(
            resolve(registry.find("Writing").unwrap()),
            Selection::Navigate(Route::Writing)
        );
        assert_eq!(
            resolve(registry.find("Dark").unwrap()),
            Selection::Invoke(THEME_DARK.into())
        );
    }

    #[test]
    fn test_resolve_external_and_inert() {
        let github = Action::new("GitHub", Section::Socials).navigate("https://github.com/ryanwaits");
        assert_eq!(
            resolve(&github),
            Selection::External("https://github.com/ryanwaits".to_string())
        );

        let mail = Action::new("Mail", Section::Socials).navigate("MAILTO:hi@example.com");
        assert!(matches!(resolve(&mail), Selection::External(_)));

        let relative = Action::new("Writing", Section::Navigation).navigate("writing");
        assert_eq!(resolve(&relative), Selection::Navigate(Route::Writing));

        let soon = Action::new("Soon", Section::Navigation);
        assert_eq!(resolve(&soon), Selection::Inert);
    }
}
