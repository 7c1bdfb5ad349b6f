//! Aggregation of road features into the name search index.
//!
//! Features are keyed by (name, class, reference code). Every key owns one
//! bounding box that grows to cover the geometry of every feature sharing
//! the key. Boxes stay at full precision while features stream in and are
//! rounded once, in [`IndexBuilder::finish`].

use crate::compute::classify::Classifier;
use crate::compute::feature::RoadFeature;
use crate::compute::flatten::flatten_optional;
use crate::compute::validation::position_to_coord;
use crate::config::Config;
use crate::error::{Result, RoadIndexError};
use log::debug;
use roadindex_types::bbox::BoundingBox;
use roadindex_types::entry::{IndexEntry, IndexKey};
use roadindex_types::index::SearchIndex;
use roadindex_types::stats::IndexStats;
use rustc_hash::FxHashMap;

/// Incremental builder for a [`SearchIndex`].
///
/// Entries keep the order in which their keys were first seen.
///
/// ```rust
/// use roadindex::{Config, IndexBuilder, RoadFeature};
/// use geojson::Value;
///
/// let a = Value::LineString(vec![vec![139.7, 35.6], vec![139.8, 35.7]]);
/// let b = Value::LineString(vec![vec![139.6, 35.5]]);
///
/// let mut builder = IndexBuilder::new(&Config::default());
/// builder.add(&RoadFeature::new("Route 1", "primary", "R1", Some(&a)))?;
/// builder.add(&RoadFeature::new("Route 1", "primary", "R1", Some(&b)))?;
///
/// let index = builder.finish();
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.entries()[0].bbox.to_array(), [139.6, 35.5, 139.8, 35.7]);
/// # Ok::<(), roadindex::RoadIndexError>(())
/// ```
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    classifier: Classifier,
    precision: u32,
    slots: FxHashMap<IndexKey, usize>,
    entries: Vec<(IndexKey, BoundingBox)>,
    stats: IndexStats,
}

impl IndexBuilder {
    pub fn new(config: &Config) -> Self {
        Self {
            classifier: Classifier::from_config(config),
            precision: config.precision,
            slots: FxHashMap::default(),
            entries: Vec::new(),
            stats: IndexStats::new(),
        }
    }

    /// Add a feature, deriving its category from its class label. Labels
    /// that match no category are indexed under the overflow name.
    ///
    /// Returns `Ok(true)` if the feature contributed to an entry and
    /// `Ok(false)` if it was skipped for having no name.
    pub fn add(&mut self, feature: &RoadFeature<'_>) -> Result<bool> {
        let category = self.classifier.bucket(&feature.class_label).to_string();
        self.add_classified(feature, &category)
    }

    /// Add a feature whose category is already known, e.g. because it was
    /// read from that category's collection file. The class label is ignored.
    pub fn add_classified(&mut self, feature: &RoadFeature<'_>, category: &str) -> Result<bool> {
        let ordinal = self.stats.features_seen;
        self.stats.features_seen += 1;

        if !feature.is_named() {
            self.stats.skipped_unnamed += 1;
            return Ok(false);
        }

        let key = IndexKey::new(&*feature.name, category, &*feature.reference);

        // Box the feature on its own first so a malformed coordinate leaves
        // existing entries untouched.
        let mut feature_box = BoundingBox::EMPTY;
        let mut points = 0u64;
        for position in flatten_optional(feature.geometry) {
            match position_to_coord(position) {
                Ok(coord) => feature_box.extend(coord),
                Err(reason) => {
                    return Err(RoadIndexError::MalformedGeometry {
                        key,
                        feature: ordinal,
                        reason,
                    });
                }
            }
            points += 1;
        }

        self.merge_box(key, &feature_box);
        self.stats.features_indexed += 1;
        self.stats.points += points;
        Ok(true)
    }

    /// Add every feature of `features`, stopping at the first error.
    pub fn extend<'a, I>(&mut self, features: I) -> Result<()>
    where
        I: IntoIterator<Item = RoadFeature<'a>>,
    {
        for feature in features {
            self.add(&feature)?;
        }
        Ok(())
    }

    /// Fold another partial aggregation into this one.
    ///
    /// Keys present in both get the union of their boxes; keys only in
    /// `other` are appended in `other`'s order. Since the per-key reduction
    /// is min/max, merging partial builders gives the same boxes as feeding
    /// every feature to a single builder.
    pub fn merge(&mut self, other: IndexBuilder) {
        for (key, bbox) in other.entries {
            self.merge_box(key, &bbox);
        }
        self.stats.absorb(&other.stats);
    }

    fn merge_box(&mut self, key: IndexKey, bbox: &BoundingBox) {
        if let Some(&slot) = self.slots.get(&key) {
            self.entries[slot].1.merge(bbox);
            return;
        }

        debug!("new index entry {}", key);
        let mut entry_box = BoundingBox::EMPTY;
        entry_box.merge(bbox);
        self.slots.insert(key.clone(), self.entries.len());
        self.entries.push((key, entry_box));
    }

    /// Current, unrounded box for `key`.
    pub fn get(&self, key: &IndexKey) -> Option<&BoundingBox> {
        self.slots.get(key).map(|&slot| &self.entries[slot].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> &IndexStats {
        &self.stats
    }

    /// Round every box to the configured precision and emit the index.
    pub fn finish(self) -> SearchIndex {
        let precision = self.precision;
        let entries = self
            .entries
            .into_iter()
            .map(|(key, bbox)| IndexEntry::new(key, bbox.rounded(precision)))
            .collect();
        SearchIndex::new(entries)
    }
}

/// Build an index from a sequence of features in one call.
pub fn build<'a, I>(features: I, config: &Config) -> Result<SearchIndex>
where
    I: IntoIterator<Item = RoadFeature<'a>>,
{
    let mut builder = IndexBuilder::new(config);
    builder.extend(features)?;
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value;

    fn line(coords: &[[f64; 2]]) -> Value {
        Value::LineString(coords.iter().map(|c| c.to_vec()).collect())
    }

    #[test]
    fn test_route_1_scenario() {
        let a = line(&[[139.7, 35.6], [139.8, 35.7]]);
        let b = line(&[[139.6, 35.5]]);
        let features = vec![
            RoadFeature::new("Route 1", "primary", "R1", Some(&a)),
            RoadFeature::new("Route 1", "primary", "R1", Some(&b)),
        ];

        let index = build(features, &Config::default()).unwrap();

        assert_eq!(index.len(), 1);
        let entry = &index.entries()[0];
        assert_eq!(entry.name, "Route 1");
        assert_eq!(entry.fclass, "primary");
        assert_eq!(entry.reference, "R1");
        assert_eq!(entry.bbox.to_array(), [139.6, 35.5, 139.8, 35.7]);
    }

    #[test]
    fn test_order_independence() {
        let p = Value::Point(vec![10.0, 20.0]);
        let q = Value::Point(vec![5.0, 25.0]);
        let config = Config::default();

        let forward = build(
            [
                RoadFeature::new("A", "trunk", "", Some(&p)),
                RoadFeature::new("A", "trunk", "", Some(&q)),
            ],
            &config,
        )
        .unwrap();
        let backward = build(
            [
                RoadFeature::new("A", "trunk", "", Some(&q)),
                RoadFeature::new("A", "trunk", "", Some(&p)),
            ],
            &config,
        )
        .unwrap();

        assert_eq!(forward, backward);
        assert_eq!(forward.entries()[0].bbox.to_array(), [5.0, 20.0, 10.0, 25.0]);
    }

    #[test]
    fn test_unnamed_features_never_touch_index() {
        let geometry = line(&[[1.0, 1.0], [2.0, 2.0]]);
        let mut builder = IndexBuilder::new(&Config::default());

        assert!(!builder.add(&RoadFeature::new("", "motorway", "E1", Some(&geometry))).unwrap());
        assert!(builder.is_empty());
        assert_eq!(builder.stats().skipped_unnamed, 1);
        assert_eq!(builder.stats().features_indexed, 0);
    }

    #[test]
    fn test_unnamed_malformed_feature_is_skipped_not_fatal() {
        let bad = Value::Point(vec![1.0]);
        let mut builder = IndexBuilder::new(&Config::default());
        assert!(!builder.add(&RoadFeature::new("", "motorway", "", Some(&bad))).unwrap());
    }

    #[test]
    fn test_rounding_happens_once() {
        let a = Value::Point(vec![10.123456, 1.0]);
        let b = Value::Point(vec![10.123454, 1.0]);
        let mut builder = IndexBuilder::new(&Config::default());
        builder.add(&RoadFeature::new("A", "motorway", "", Some(&a))).unwrap();
        builder.add(&RoadFeature::new("A", "motorway", "", Some(&b))).unwrap();

        let key = IndexKey::new("A", "motorway", "");
        assert_eq!(builder.get(&key).unwrap().max_x, 10.123456);

        let index = builder.finish();
        let bbox = index.get(&key).unwrap().bbox;
        assert_eq!(bbox.max_x, 10.12346);
        assert_eq!(bbox.min_x, 10.12345);
    }

    #[test]
    fn test_keys_distinguish_class_and_ref() {
        let g = Value::Point(vec![1.0, 1.0]);
        let index = build(
            [
                RoadFeature::new("A", "motorway", "E1", Some(&g)),
                RoadFeature::new("A", "motorway_link", "E1", Some(&g)),
                RoadFeature::new("A", "trunk", "E1", Some(&g)),
                RoadFeature::new("A", "motorway", "E2", Some(&g)),
            ],
            &Config::default(),
        )
        .unwrap();

        // motorway_link collapses into motorway/E1
        assert_eq!(index.len(), 3);
        let keys: Vec<IndexKey> = index.iter().map(IndexEntry::key).collect();
        assert_eq!(
            keys,
            vec![
                IndexKey::new("A", "motorway", "E1"),
                IndexKey::new("A", "trunk", "E1"),
                IndexKey::new("A", "motorway", "E2"),
            ]
        );
    }

    #[test]
    fn test_overflow_class_indexed_under_overflow_name() {
        let g = Value::Point(vec![1.0, 2.0]);
        let index = build(
            [RoadFeature::new("Side St", "residential", "", Some(&g))],
            &Config::default(),
        )
        .unwrap();

        assert_eq!(index.len(), 1);
        let entry = &index.entries()[0];
        assert_eq!(entry.name, "Side St");
        assert_eq!(entry.fclass, "others");
        assert_eq!(entry.bbox.to_array(), [1.0, 2.0, 1.0, 2.0]);

        let config = Config::default().with_overflow("rest");
        let mut builder = IndexBuilder::new(&config);
        assert!(builder.add(&RoadFeature::new("Lane", "", "", Some(&g))).unwrap());
        assert_eq!(builder.finish().entries()[0].fclass, "rest");
    }

    #[test]
    fn test_add_classified_ignores_label() {
        let g = Value::Point(vec![1.0, 1.0]);
        let mut builder = IndexBuilder::new(&Config::default());
        builder
            .add_classified(&RoadFeature::new("A", "residential", "", Some(&g)), "secondary")
            .unwrap();
        let index = builder.finish();
        assert_eq!(index.entries()[0].fclass, "secondary");
    }

    #[test]
    fn test_named_feature_without_geometry_keeps_sentinel() {
        let mut builder = IndexBuilder::new(&Config::default());
        builder.add(&RoadFeature::new("Ghost", "trunk", "", None)).unwrap();

        let index = builder.finish();
        assert_eq!(index.len(), 1);
        assert_eq!(index.entries()[0].bbox, BoundingBox::EMPTY);
    }

    #[test]
    fn test_malformed_geometry_is_fatal_and_names_feature() {
        let good = Value::Point(vec![1.0, 1.0]);
        let bad = Value::LineString(vec![vec![2.0, 2.0], vec![3.0]]);
        let mut builder = IndexBuilder::new(&Config::default());
        builder.add(&RoadFeature::new("A", "trunk", "T1", Some(&good))).unwrap();

        let err = builder
            .add(&RoadFeature::new("A", "trunk", "T1", Some(&bad)))
            .unwrap_err();

        match &err {
            RoadIndexError::MalformedGeometry { key, feature, .. } => {
                assert_eq!(key, &IndexKey::new("A", "trunk", "T1"));
                assert_eq!(*feature, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("\"A\""));

        // the valid position of the bad feature was not merged
        let bbox = builder.get(&IndexKey::new("A", "trunk", "T1")).unwrap();
        assert_eq!(bbox.to_array(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let geoms: Vec<Value> = (0..6)
            .map(|i| Value::Point(vec![i as f64, -(i as f64)]))
            .collect();
        let names = ["A", "B", "A", "C", "B", "A"];
        let config = Config::default();

        let single = build(
            names
                .iter()
                .zip(&geoms)
                .map(|(n, g)| RoadFeature::new(*n, "primary", "", Some(g))),
            &config,
        )
        .unwrap();

        let mut left = IndexBuilder::new(&config);
        let mut right = IndexBuilder::new(&config);
        for (i, (n, g)) in names.iter().zip(&geoms).enumerate() {
            let feature = RoadFeature::new(*n, "primary", "", Some(g));
            if i % 2 == 0 {
                left.add(&feature).unwrap();
            } else {
                right.add(&feature).unwrap();
            }
        }
        left.merge(right);

        assert_eq!(left.stats().features_indexed, 6);
        assert_eq!(left.stats().points, 6);
        assert_eq!(left.finish(), single);
    }
}
