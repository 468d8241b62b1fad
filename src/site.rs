//! Site content: owner profile, contact links, posts and blog options.
//!
//! Defaults reproduce the published home page, so an empty config file still
//! yields the full portfolio.

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactLink {
    /// Label shown above the link, e.g. "GitHub".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ContactLink {
    pub fn link(website: &str, title: &str, href: &str) -> Self {
        Self {
            website: Some(website.to_string()),
            title: title.to_string(),
            href: Some(href.to_string()),
            email: None,
        }
    }

    /// Text copied when the contact is activated. Links win over emails.
    pub fn copy_target(&self) -> Option<&str> {
        self.href.as_deref().or(self.email.as_deref())
    }

    pub fn label(&self) -> &str {
        self.website.as_deref().unwrap_or(&self.title)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub owner: String,
    pub tagline: String,
    pub badge: String,
    pub about: Vec<String>,
    pub contacts: Vec<ContactLink>,
    pub posts: Vec<Post>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner: "Ryan Waits".to_string(),
            tagline: "Product Developer in Austin, TX".to_string(),
            badge: "✨".to_string(),
            about: vec![
                "Primary focus lies in the realm of blockchain technology, with a particular \
                 emphasis on the Stacks ecosystem and Bitcoin. With a strong foundation in dev \
                 tooling and other primitives, I have dedicated my career to building robust \
                 libraries and SDKs that empower others in the blockchain space."
                    .to_string(),
                "Current explorations involve the intersection of AI and blockchain technology, \
                 as I work on creating data assistants and refining tools to enhance learning \
                 experiences and information retention."
                    .to_string(),
                "Having studied economics and being a self-taught developer, my unique background \
                 has equipped me with the skills and knowledge to innovate and drive progress in \
                 the ever-evolving world of blockchain and AI."
                    .to_string(),
            ],
            contacts: vec![
                ContactLink::link("Twitter", "ryan_waits", "https://twitter.com/ryan_waits"),
                ContactLink::link("GitHub", "ryanwaits", "https://github.com/ryanwaits"),
                ContactLink::link("CV", "waits", "https://read.cv/ryanwaits"),
            ],
            posts: Vec::new(),
        }
    }
}

impl SiteConfig {
    /// Posts sorted newest first. Undated posts keep their declared order
    /// after every dated one.
    pub fn posts_newest_first(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.posts.iter().collect();
        posts.sort_by(|a, b| match (a.date, b.date) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        posts
    }

    pub fn footer(&self) -> String {
        footer(&self.owner, Local::now().year())
    }
}

/// Blog chrome options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    /// Label of the per-post link on the writing index.
    pub read_more: String,
    /// When false the dark palette is never applied.
    pub dark_mode: bool,
    pub favicon_glyph: String,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            read_more: "View".to_string(),
            dark_mode: true,
            favicon_glyph: "👋".to_string(),
        }
    }
}

pub fn footer(owner: &str, year: i32) -> String {
    format!("© By {owner} {year}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str, date: Option<(i32, u32, u32)>) -> Post {
        Post {
            title: title.to_string(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            summary: None,
            href: None,
        }
    }

    #[test]
    fn test_default_contacts() {
        let site = SiteConfig::default();
        let labels: Vec<&str> = site.contacts.iter().map(ContactLink::label).collect();
        assert_eq!(labels, vec!["Twitter", "GitHub", "CV"]);
        assert_eq!(
            site.contacts[1].copy_target(),
            Some("https://github.com/ryanwaits")
        );
        assert_eq!(site.about.len(), 3);
    }

    #[test]
    fn test_copy_target_falls_back_to_email() {
        let contact = ContactLink {
            website: None,
            title: "Mail".to_string(),
            href: None,
            email: Some("hi@example.com".to_string()),
        };
        assert_eq!(contact.copy_target(), Some("hi@example.com"));
        assert_eq!(contact.label(), "Mail");
    }

    #[test]
    fn test_posts_newest_first() {
        let site = SiteConfig {
            posts: vec![
                post("undated-a", None),
                post("old", Some((2021, 3, 1))),
                post("new", Some((2023, 6, 12))),
                post("undated-b", None),
            ],
            ..SiteConfig::default()
        };
        let titles: Vec<&str> = site
            .posts_newest_first()
            .iter()
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["new", "old", "undated-a", "undated-b"]);
    }

    #[test]
    fn test_footer() {
        assert_eq!(footer("Ryan Waits", 2024), "© By Ryan Waits 2024");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let site: SiteConfig = toml::from_str(
            r#"
            owner = "Someone Else"

            [[posts]]
            title = "Hello"
            date = "2024-01-02"
            "#,
        )
        .unwrap();
        assert_eq!(site.owner, "Someone Else");
        assert_eq!(site.tagline, "Product Developer in Austin, TX");
        assert_eq!(site.posts[0].date, NaiveDate::from_ymd_opt(2024, 1, 2));
    }
}
