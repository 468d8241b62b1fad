//! Full-screen pages, one per [`Route`].
//!
//! Pages know the site content but nothing about the palette or handlers.
//! They report what the user asked for through [`PageEvent`] and the app
//! decides what happens next.

mod home;
mod not_found;
mod writing;

use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use writing::WritingPage;

use crate::Theme;
use crate::config::KeyResolver;
use crate::route::Route;
use crate::site::{BlogConfig, SiteConfig};
use crate::ui::{EventResult, Keybinding, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// Copy `text` to the clipboard. `label` names it in the toast.
    Copy { text: String, label: String },
}

pub trait Page {
    fn route(&self) -> Route;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<PageEvent>> {
        _ = key;
        Ok(EventResult::Ignored)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme);

    /// Page-specific keybindings for the help overlay and status bar.
    fn keybindings(&self) -> Vec<Keybinding> {
        vec![]
    }
}

/// Build the page for `route` from the current site content.
pub fn build(
    route: &Route,
    site: &SiteConfig,
    blog: &BlogConfig,
    resolver: Arc<KeyResolver>,
) -> Box<dyn Page> {
    match route {
        Route::Home => Box::new(HomePage::new(site, resolver)),
        Route::Writing => Box::new(WritingPage::new(site, blog, resolver)),
        Route::NotFound(path) => Box::new(NotFoundPage::new(path.clone())),
    }
}

/// Section heading shared by the pages.
fn heading(title: &str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        title.to_string(),
        Style::default()
            .fg(theme.text_tertiary())
            .add_modifier(Modifier::BOLD),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matches_route() {
        let site = SiteConfig::default();
        let blog = BlogConfig::default();
        let resolver = Arc::new(KeyResolver::default());

        for route in [
            Route::Home,
            Route::Writing,
            Route::NotFound("/uses".to_string()),
        ] {
            let page = build(&route, &site, &blog, resolver.clone());
            assert_eq!(page.route(), route);
        }
    }
}
