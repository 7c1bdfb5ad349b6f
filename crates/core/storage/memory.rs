//! In-memory collection store.

use super::CollectionStore;
use crate::error::Result;
use geojson::FeatureCollection;
use rustc_hash::FxHashMap;

/// Collection store backed by a HashMap
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: FxHashMap<String, FeatureCollection>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: impl Into<String>, collection: FeatureCollection) {
        self.collections.insert(bucket.into(), collection);
    }

    pub fn get(&self, bucket: &str) -> Option<&FeatureCollection> {
        self.collections.get(bucket)
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self, bucket: &str) -> Result<Option<FeatureCollection>> {
        Ok(self.collections.get(bucket).cloned())
    }

    fn store(&mut self, bucket: &str, collection: &FeatureCollection) -> Result<()> {
        self.collections
            .insert(bucket.to_string(), collection.clone());
        Ok(())
    }

    fn contains(&self, bucket: &str) -> bool {
        self.collections.contains_key(bucket)
    }
}
