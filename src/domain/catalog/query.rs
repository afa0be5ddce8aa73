//! Catalog browsing: search and category filters.

use super::CatalogItem;

/// Filter applied to the effective catalog when browsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Case-insensitive description substring, or code substring.
    pub search: Option<String>,
    /// Exact category name.
    pub category: Option<String>,
}

impl CatalogQuery {
    /// Creates an empty query that matches everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Sets the search term.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the category filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Returns true if the item passes both filters.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                item.description.to_lowercase().contains(&term.to_lowercase())
                    || item.code.as_str().contains(term)
            }
        };
        let matches_category = match &self.category {
            None => true,
            Some(category) => &item.category == category,
        };
        matches_search && matches_category
    }

    /// Applies the query, preserving catalog order.
    pub fn apply(&self, items: &[CatalogItem]) -> Vec<CatalogItem> {
        items.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

/// Distinct categories in first-appearance order.
pub fn categories(items: &[CatalogItem]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for item in items {
        if !seen.iter().any(|c| c == &item.category) {
            seen.push(item.category.clone());
        }
    }
    seen
}
