//! Fuzzy matching for the command palette.
//!
//! Wraps the matcher implementation so the palette only sees `matches`.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default(),
        }
    }

    /// Case-insensitive fuzzy match allowing gaps between pattern characters.
    /// A blank pattern matches everything.
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return true;
        }
        // Smart case treats any uppercase as case-sensitive, so lower it first.
        let pattern_lower = pattern.to_lowercase();
        self.inner.fuzzy_match(text, &pattern_lower).is_some()
    }

    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>, pattern: &str) -> bool {
        texts.into_iter().any(|text| self.matches(text, pattern))
    }
}
