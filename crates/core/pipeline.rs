//! The two passes over road data: splitting a collection into per-category
//! collections, and building the search index from those collections.

use crate::compute::aggregate::IndexBuilder;
use crate::compute::feature::RoadFeature;
use crate::compute::partition::split_collection;
use crate::config::Config;
use crate::error::Result;
use crate::storage::CollectionStore;
use geojson::FeatureCollection;
use log::{info, warn};
use roadindex_types::index::SearchIndex;
use roadindex_types::stats::IndexStats;

/// Outcome of [`split_to_store`]: feature count per bucket, in bucket order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub buckets: Vec<(String, usize)>,
}

impl SplitReport {
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, count)| count).sum()
    }

    pub fn count(&self, bucket: &str) -> Option<usize> {
        self.buckets
            .iter()
            .find(|(name, _)| name == bucket)
            .map(|(_, count)| *count)
    }
}

/// Outcome of [`index_store`].
#[derive(Debug, Clone, Default)]
pub struct IndexReport {
    pub index: SearchIndex,
    pub stats: IndexStats,
    /// Named features indexed from each category that was present
    pub categories: Vec<(String, u64)>,
    /// Categories whose collection was not found
    pub missing: Vec<String>,
}

/// Partition `collection` by class and store one collection per bucket,
/// overflow included.
pub fn split_to_store<S>(collection: FeatureCollection, config: &Config, store: &mut S) -> Result<SplitReport>
where
    S: CollectionStore + ?Sized,
{
    let partition = split_collection(collection, config);
    let mut report = SplitReport::default();

    for (bucket, collection) in partition.into_collections() {
        let count = collection.features.len();
        store.store(&bucket, &collection)?;
        info!("{:12}: {:6} features", bucket, count);
        report.buckets.push((bucket, count));
    }

    info!("{:12}: {:6} features", "total", report.total());
    Ok(report)
}

/// Build the search index from the per-category collections in `store`.
///
/// Each collection is indexed under its own category name; class labels
/// inside the files are not re-classified. A missing category is logged and
/// skipped, and the remaining categories are still processed. The overflow
/// bucket is read only when `index_overflow` is set.
pub fn index_store<S>(store: &S, config: &Config) -> Result<IndexReport>
where
    S: CollectionStore + ?Sized,
{
    let mut builder = IndexBuilder::new(config);
    let mut report = IndexReport::default();

    let overflow = config.index_overflow.then_some(config.overflow.as_str());
    let buckets = config.categories.iter().map(String::as_str).chain(overflow);

    for category in buckets {
        let Some(collection) = store.load(category)? else {
            warn!("no collection for category '{}', skipping", category);
            report.missing.push(category.to_string());
            continue;
        };

        info!("indexing {} ({} features)", category, collection.features.len());
        let before = builder.stats().features_indexed;
        for feature in &collection.features {
            let road = RoadFeature::from_geojson(feature, &config.properties);
            builder.add_classified(&road, category)?;
        }
        let indexed = builder.stats().features_indexed - before;

        info!("  {}: {} features with name", category, indexed);
        report.categories.push((category.to_string(), indexed));
    }

    report.stats = builder.stats().clone();
    report.index = builder.finish();
    info!("index entries: {}", report.index.len());
    Ok(report)
}
