//! Name, class and reference lookups over a finished index.

use roadindex_types::entry::IndexEntry;
use roadindex_types::index::SearchIndex;
use serde::{Deserialize, Serialize};

/// Search criteria; empty fields are ignored and every non-empty field must
/// match.
///
/// - `name`: case-insensitive substring of the entry name
/// - `fclass`: exact class
/// - `reference`: case-insensitive, equal to one of the entry's
///   `;`-separated reference codes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub fclass: String,
    #[serde(default, rename = "ref")]
    pub reference: String,
}

impl SearchQuery {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_fclass(mut self, fclass: impl Into<String>) -> Self {
        self.fclass = fclass.into();
        self
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = reference.into();
        self
    }

    /// True when no criterion is set. An empty query matches nothing.
    pub fn is_empty(&self) -> bool {
        self.name.trim().is_empty()
            && self.fclass.trim().is_empty()
            && self.reference.trim().is_empty()
    }

    pub fn matches(&self, entry: &IndexEntry) -> bool {
        if self.is_empty() {
            return false;
        }

        let name = self.name.trim();
        if !name.is_empty() && !entry.name.to_lowercase().contains(&name.to_lowercase()) {
            return false;
        }

        let fclass = self.fclass.trim();
        if !fclass.is_empty() && entry.fclass != fclass {
            return false;
        }

        let reference = self.reference.trim();
        if !reference.is_empty()
            && !entry
                .references()
                .any(|r| r.to_lowercase() == reference.to_lowercase())
        {
            return false;
        }

        true
    }
}

/// Entries of `index` matching `query`, in index order.
pub fn search<'a>(index: &'a SearchIndex, query: &SearchQuery) -> Vec<&'a IndexEntry> {
    if query.is_empty() {
        return Vec::new();
    }
    index.iter().filter(|entry| query.matches(entry)).collect()
}
