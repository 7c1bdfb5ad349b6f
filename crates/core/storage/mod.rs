//! Storage of per-category road collections and of the search index.
//!
//! [`CollectionStore`] abstracts where category collections live, so the
//! split and index passes run the same against a directory of GeoJSON
//! files or an in-memory map.

use crate::error::Result;
use geojson::FeatureCollection;

mod directory;
mod index_file;
mod memory;

pub use directory::{DirectoryStore, read_collection, write_collection};
pub use index_file::{index_to_json, read_index, write_index};
pub use memory::MemoryStore;

/// A place that holds one feature collection per bucket name.
pub trait CollectionStore {
    /// Load the collection for `bucket`, or `None` if the store has none.
    fn load(&self, bucket: &str) -> Result<Option<FeatureCollection>>;

    /// Store `collection` under `bucket`, replacing any previous one.
    fn store(&mut self, bucket: &str, collection: &FeatureCollection) -> Result<()>;

    /// Check if a collection exists for `bucket`.
    fn contains(&self, bucket: &str) -> bool;
}
