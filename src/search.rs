//! Live marker search.

use crate::data::markers::{LocationMarker, MarkerDataset};

/// Markers whose title contains `query`, ignoring case, in dataset order.
///
/// An empty query yields nothing, same as a query that matches nothing.
pub fn filtered_markers<'a>(dataset: &'a MarkerDataset, query: &str) -> Vec<&'a LocationMarker> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    dataset
        .iter()
        .filter(|marker| marker.title.to_lowercase().contains(&needle))
        .collect()
}

/// The mutable search query bound to the search box
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn clear(&mut self) {
        self.query.clear();
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Recomputed on every call
    pub fn results<'a>(&self, dataset: &'a MarkerDataset) -> Vec<&'a LocationMarker> {
        filtered_markers(dataset, &self.query)
    }
}
