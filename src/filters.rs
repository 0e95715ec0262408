/// The set of genres the user has filtered out of the feed.
use serde::{Deserialize, Serialize};

/// Persisted genre filter list. Order is irrelevant; duplicates are kept out
/// on insert, not on read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterList(Vec<String>);

impl FilterList {
    pub fn new() -> Self {
        FilterList(Vec::new())
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.0.iter().any(|g| g == genre)
    }

    /// Add a genre; returns false (and leaves the list alone) if it is
    /// already present.
    pub fn insert(&mut self, genre: &str) -> bool {
        if self.contains(genre) {
            return false;
        }
        self.0.push(genre.to_string());
        true
    }

    /// Remove a genre; returns false if it was not present.
    pub fn remove(&mut self, genre: &str) -> bool {
        let original_len = self.0.len();
        self.0.retain(|g| g != genre);
        self.0.len() < original_len
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
