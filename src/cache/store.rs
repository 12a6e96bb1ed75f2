//! In-memory resource-to-handle mapping

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from resource key (e.g. a file name) to the remote-issued handle
///
/// Serialized as a flat JSON object: `{"clip.ogg": "AwACAgIAAxk..."}`.
/// One handle per key; a later `store` for the same key replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HandleStore {
    entries: HashMap<String, String>,
}

impl HandleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the handle cached for a resource key
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Record a handle for a resource key, returning the handle it replaced
    pub fn store(&mut self, key: impl Into<String>, handle: impl Into<String>) -> Option<String> {
        self.entries.insert(key.into(), handle.into())
    }

    /// Drop the handle for a resource key
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key, for stable display
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

impl FromIterator<(String, String)> for HandleStore {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
