//! Split OSM road collections by class and build a compact name search index.
//!
//! ## Features
//! - **Classification**: prefix matching of class labels (`motorway_link`
//!   belongs to `motorway`) with an overflow bucket for everything else
//! - **Partitioning**: one feature collection per category, metadata preserved
//! - **Search index**: one entry per (name, class, ref) with the bounding box of
//!   every matching geometry, rounded once at the end
//! - **Search**: name / class / ref lookups over a finished index
//!
//! ```rust
//! use roadindex::{Config, RoadFeature, build_index};
//! use geojson::Value;
//!
//! let a = Value::LineString(vec![vec![139.7, 35.6], vec![139.8, 35.7]]);
//! let b = Value::LineString(vec![vec![139.6, 35.5]]);
//! let features = [
//!     RoadFeature::new("Route 1", "primary", "R1", Some(&a)),
//!     RoadFeature::new("Route 1", "primary", "R1", Some(&b)),
//! ];
//!
//! let index = build_index(features, &Config::default())?;
//! assert_eq!(
//!     roadindex::index_to_json(&index)?,
//!     r#"[{"name":"Route 1","fclass":"primary","ref":"R1","bbox":[139.6,35.5,139.8,35.7]}]"#
//! );
//! # Ok::<(), roadindex::RoadIndexError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod storage;

pub use config::{Config, PropertyNames};
pub use error::{Result, RoadIndexError};

pub use compute::aggregate::{IndexBuilder, build as build_index};
pub use compute::classify::{Classification, Classifier, classify};
pub use compute::feature::RoadFeature;
pub use compute::flatten::flatten;
pub use compute::partition::{Partition, partition, split_collection};
pub use compute::search::{SearchQuery, search};

pub use pipeline::{IndexReport, SplitReport, index_store, split_to_store};

pub use storage::{
    CollectionStore, DirectoryStore, MemoryStore, index_to_json, read_collection, read_index,
    write_collection, write_index,
};

pub use roadindex_types::bbox::BoundingBox;
pub use roadindex_types::entry::{IndexEntry, IndexKey};
pub use roadindex_types::index::SearchIndex;
pub use roadindex_types::stats::IndexStats;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{
        BoundingBox, Classifier, Config, IndexBuilder, IndexEntry, IndexKey, Result,
        RoadFeature, RoadIndexError, SearchIndex, SearchQuery,
    };

    pub use crate::{CollectionStore, DirectoryStore, MemoryStore};
}
