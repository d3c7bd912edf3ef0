//! Optional filter for names that plausibly denote a coffee venue.
//!
//! Deliberately permissive: it only exists to drop obviously unrelated venues
//! when the upstream query was broadened by keyword rather than category.

use indiebrew_core::{normalize, ClassifierLists};

#[derive(Debug, Clone)]
pub struct RelevanceFilter {
    hints: Vec<String>,
}

impl Default for RelevanceFilter {
    fn default() -> Self {
        Self::new(&ClassifierLists::default())
    }
}

impl RelevanceFilter {
    #[must_use]
    pub fn new(lists: &ClassifierLists) -> Self {
        let hints = lists
            .coffee_hints
            .iter()
            .map(|hint| normalize(hint))
            .filter(|hint| !hint.is_empty())
            .collect();
        Self { hints }
    }

    /// Returns `true` if the normalized name contains any coffee hint.
    #[must_use]
    pub fn looks_like_coffee_venue(&self, name: &str) -> bool {
        let normalized = normalize(name);
        self.hints
            .iter()
            .any(|hint| normalized.contains(hint.as_str()))
    }
}
