use crate::entry::{IndexEntry, IndexKey};
use serde::{Deserialize, Serialize};

/// A finished search index: entries in the order their keys were first seen.
///
/// Serializes as a bare JSON array of [`IndexEntry`] records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<IndexEntry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndexEntry> {
        self.entries.iter()
    }

    /// Look up the entry for an exact key.
    pub fn get(&self, key: &IndexKey) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| {
            e.name == key.name && e.fclass == key.fclass && e.reference == key.reference
        })
    }
}

impl<'a> IntoIterator for &'a SearchIndex {
    type Item = &'a IndexEntry;
    type IntoIter = std::slice::Iter<'a, IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl IntoIterator for SearchIndex {
    type Item = IndexEntry;
    type IntoIter = std::vec::IntoIter<IndexEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
