use thiserror::Error;

use crate::catalog::{SearchCategory, SearchQuery};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no search category selected")]
    NoCategory,
    #[error("query '{query}' is not valid for category '{category}'")]
    InvalidQueryForCategory {
        category: SearchCategory,
        query: SearchQuery,
    },
}

/// The panel's current `(category, query)` pair with validated setters.
///
/// Changing the category always clears the query; the valid query set is
/// re-derived from the catalog on every call rather than cached, so a stale
/// set can never leak across a category change.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    category: Option<SearchCategory>,
    query: Option<SearchQuery>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current category and clear the current query. Returns the
    /// freshly derived query set for the new category.
    pub fn set_category(&mut self, category: SearchCategory) -> &'static [SearchQuery] {
        self.category = Some(category);
        self.query = None;
        tracing::debug!(category = %category, "search category changed");
        category.queries()
    }

    /// Set the current query. Rejected without touching state when no
    /// category is selected or the token is not in the category's set.
    pub fn set_query(&mut self, query: SearchQuery) -> Result<(), SelectionError> {
        let category = self.category.ok_or(SelectionError::NoCategory)?;
        if !category.contains(query) {
            return Err(SelectionError::InvalidQueryForCategory { category, query });
        }
        self.query = Some(query);
        tracing::debug!(category = %category, query = %query, "search query changed");
        Ok(())
    }

    /// `Some((category, query))` only once both halves have been set validly.
    pub fn current_selection(&self) -> Option<(SearchCategory, SearchQuery)> {
        match (self.category, self.query) {
            (Some(category), Some(query)) => Some((category, query)),
            _ => None,
        }
    }

    pub fn category(&self) -> Option<SearchCategory> {
        self.category
    }

    pub fn query(&self) -> Option<SearchQuery> {
        self.query
    }

    /// Valid query tokens for the current category; empty before any category
    /// has been chosen.
    pub fn valid_queries(&self) -> &'static [SearchQuery] {
        self.category.map(|c| c.queries()).unwrap_or(&[])
    }

    pub fn clear(&mut self) {
        self.category = None;
        self.query = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
