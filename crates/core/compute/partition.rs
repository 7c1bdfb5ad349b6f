//! Partitioning a road collection into per-category collections.

use crate::compute::classify::Classifier;
use crate::config::{Config, PropertyNames};
use geojson::{Bbox, Feature, FeatureCollection, JsonObject};

/// Features of one collection sorted into buckets: the configured
/// categories in order, then the overflow bucket.
///
/// The source collection's `bbox` and foreign members are kept so every
/// bucket can be written back out as a collection with the same metadata.
#[derive(Debug, Clone)]
pub struct Partition {
    buckets: Vec<(String, Vec<Feature>)>,
    bbox: Option<Bbox>,
    foreign_members: Option<JsonObject>,
}

impl Partition {
    fn empty(classifier: &Classifier) -> Self {
        let buckets = classifier
            .categories()
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(classifier.overflow()))
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            buckets,
            bbox: None,
            foreign_members: None,
        }
    }

    /// Features assigned to `bucket`, or `None` for an unknown bucket name.
    pub fn get(&self, bucket: &str) -> Option<&[Feature]> {
        self.buckets
            .iter()
            .find(|(name, _)| name == bucket)
            .map(|(_, features)| features.as_slice())
    }

    /// Buckets in order with their features, empty buckets included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Feature])> {
        self.buckets
            .iter()
            .map(|(name, features)| (name.as_str(), features.as_slice()))
    }

    /// `(bucket, feature count)` pairs in bucket order.
    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.iter().map(|(name, features)| (name, features.len())).collect()
    }

    /// Total number of features across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|(_, features)| features.len()).sum()
    }

    /// One collection per bucket, each carrying the source collection's
    /// `bbox` and foreign members.
    pub fn into_collections(self) -> Vec<(String, FeatureCollection)> {
        let Partition {
            buckets,
            bbox,
            foreign_members,
        } = self;

        buckets
            .into_iter()
            .map(|(name, features)| {
                let collection = FeatureCollection {
                    bbox: bbox.clone(),
                    features,
                    foreign_members: foreign_members.clone(),
                };
                (name, collection)
            })
            .collect()
    }
}

/// Sort `features` into buckets by their class label property.
pub fn partition<I>(features: I, classifier: &Classifier, names: &PropertyNames) -> Partition
where
    I: IntoIterator<Item = Feature>,
{
    let mut partition = Partition::empty(classifier);
    let overflow_slot = partition.buckets.len() - 1;

    for feature in features {
        let label = class_label(&feature, &names.class);
        let slot = classifier.category_index(label).unwrap_or(overflow_slot);
        partition.buckets[slot].1.push(feature);
    }

    partition
}

/// Partition a whole collection, keeping its metadata for the outputs.
pub fn split_collection(collection: FeatureCollection, config: &Config) -> Partition {
    let classifier = Classifier::from_config(config);
    let FeatureCollection {
        bbox,
        features,
        foreign_members,
    } = collection;

    let mut partition = partition(features, &classifier, &config.properties);
    partition.bbox = bbox;
    partition.foreign_members = foreign_members;
    partition
}

fn class_label<'a>(feature: &'a Feature, property: &str) -> &'a str {
    feature
        .properties
        .as_ref()
        .and_then(|p| p.get(property))
        .and_then(|v| v.as_str())
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn road(fclass: Option<&str>) -> Feature {
        let json = match fclass {
            Some(fclass) => format!(
                r#"{{"type":"Feature","properties":{{"fclass":"{}"}},"geometry":null}}"#,
                fclass
            ),
            None => r#"{"type":"Feature","properties":{},"geometry":null}"#.to_string(),
        };
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_partition_routes_by_prefix() {
        let features = vec![
            road(Some("motorway")),
            road(Some("motorway_link")),
            road(Some("trunk")),
            road(Some("residential")),
            road(Some("secondary_link")),
            road(None),
        ];

        let classifier = Classifier::default();
        let partition = partition(features, &classifier, &PropertyNames::default());

        assert_eq!(
            partition.counts(),
            vec![
                ("motorway", 2),
                ("trunk", 1),
                ("primary", 0),
                ("secondary", 1),
                ("others", 2),
            ]
        );
        assert_eq!(partition.total(), 6);
        assert!(partition.get("nonexistent").is_none());
    }

    #[test]
    fn test_every_feature_lands_in_exactly_one_bucket() {
        let labels = ["motorway", "footway", "", "primary_link", "trunkline"];
        let features: Vec<Feature> = labels.iter().map(|l| road(Some(*l))).collect();

        let partition = partition(features, &Classifier::default(), &PropertyNames::default());
        assert_eq!(partition.total(), labels.len());
        assert_eq!(partition.get("others").unwrap().len(), 3);
    }

    #[test]
    fn test_split_keeps_collection_metadata() {
        let collection: FeatureCollection = serde_json::from_str(
            r#"{"type":"FeatureCollection","name":"osm","crs":{"type":"name"},
                "features":[{"type":"Feature","properties":{"fclass":"primary"},"geometry":null}]}"#,
        )
        .unwrap();

        let collections = split_collection(collection, &Config::default()).into_collections();
        assert_eq!(collections.len(), 5);

        for (_, collection) in &collections {
            let members = collection.foreign_members.as_ref().unwrap();
            assert_eq!(members.get("name").unwrap(), "osm");
            assert!(members.contains_key("crs"));
        }

        let (name, primary) = &collections[2];
        assert_eq!(name, "primary");
        assert_eq!(primary.features.len(), 1);
    }
}
