//! # roadindex-types
//!
//! Core data types for the roadindex road search index.
//!
//! - **Bounding boxes**: [`BoundingBox`](bbox::BoundingBox), a min/max
//!   accumulator serialized as `[min_lng, min_lat, max_lng, max_lat]`
//! - **Index records**: [`IndexKey`](entry::IndexKey) and
//!   [`IndexEntry`](entry::IndexEntry)
//! - **Finished index**: [`SearchIndex`](index::SearchIndex)
//! - **Counters**: [`IndexStats`](stats::IndexStats)
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use roadindex_types::bbox::BoundingBox;
//! use roadindex_types::entry::{IndexEntry, IndexKey};
//!
//! let mut bbox = BoundingBox::EMPTY;
//! bbox.extend(geo::coord! { x: 139.7, y: 35.6 });
//! bbox.extend(geo::coord! { x: 139.8, y: 35.7 });
//!
//! let entry = IndexEntry::new(IndexKey::new("Route 1", "primary", "R1"), bbox);
//! assert_eq!(entry.bbox.to_array(), [139.7, 35.6, 139.8, 35.7]);
//! ```

pub mod bbox;
pub mod entry;
pub mod index;
pub mod stats;

pub use geo;
