use crate::bbox::BoundingBox;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of one search index entry.
///
/// Two features with the same name, class and reference code aggregate into
/// the same entry; the key is what makes entries unique in an index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IndexKey {
    pub name: String,
    pub fclass: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

impl IndexKey {
    pub fn new(
        name: impl Into<String>,
        fclass: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            fclass: fclass.into(),
            reference: reference.into(),
        }
    }
}

impl fmt::Display for IndexKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(name={:?}, fclass={:?}, ref={:?})",
            self.name, self.fclass, self.reference
        )
    }
}

/// One record of the search index: a named road, its class, its reference
/// code and the box enclosing every geometry that shares those three.
///
/// Field order and names match the index file layout:
/// `{"name":..,"fclass":..,"ref":..,"bbox":[..]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub fclass: String,
    #[serde(rename = "ref")]
    pub reference: String,
    pub bbox: BoundingBox,
}

impl IndexEntry {
    pub fn new(key: IndexKey, bbox: BoundingBox) -> Self {
        Self {
            name: key.name,
            fclass: key.fclass,
            reference: key.reference,
            bbox,
        }
    }

    pub fn key(&self) -> IndexKey {
        IndexKey::new(&self.name, &self.fclass, &self.reference)
    }

    /// Reference codes of this entry; OSM joins multiple refs with `;`.
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.reference
            .split(';')
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}
