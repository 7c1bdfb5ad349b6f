//! Borrowed view of the road attributes the index needs from a feature.

use crate::config::PropertyNames;
use geojson::{Feature, Value};
use serde_json::{Map, Value as JsonValue};
use std::borrow::Cow;

/// One road feature: its name, class label, reference code and geometry.
///
/// Empty strings stand in for absent attributes. The view borrows from the
/// loaded [`Feature`]; text is only allocated when a property holds a
/// non-string scalar such as a numeric `ref`.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadFeature<'a> {
    pub name: Cow<'a, str>,
    pub class_label: Cow<'a, str>,
    pub reference: Cow<'a, str>,
    pub geometry: Option<&'a Value>,
}

impl<'a> RoadFeature<'a> {
    pub fn new(
        name: impl Into<Cow<'a, str>>,
        class_label: impl Into<Cow<'a, str>>,
        reference: impl Into<Cow<'a, str>>,
        geometry: Option<&'a Value>,
    ) -> Self {
        Self {
            name: name.into(),
            class_label: class_label.into(),
            reference: reference.into(),
            geometry,
        }
    }

    /// Read the road attributes of `feature` using the configured property names.
    pub fn from_geojson(feature: &'a Feature, names: &PropertyNames) -> Self {
        let properties = feature.properties.as_ref();
        Self {
            name: property_text(properties, &names.name),
            class_label: property_text(properties, &names.class),
            reference: property_text(properties, &names.reference),
            geometry: feature.geometry.as_ref().map(|g| &g.value),
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

fn property_text<'a>(properties: Option<&'a Map<String, JsonValue>>, key: &str) -> Cow<'a, str> {
    match properties.and_then(|p| p.get(key)) {
        Some(JsonValue::String(s)) => Cow::Borrowed(s.as_str()),
        Some(JsonValue::Number(n)) => Cow::Owned(n.to_string()),
        Some(JsonValue::Bool(b)) => Cow::Owned(b.to_string()),
        Some(JsonValue::Null) | Some(JsonValue::Array(_)) | Some(JsonValue::Object(_)) | None => {
            Cow::Borrowed("")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(json: &str) -> Feature {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_reads_default_properties() {
        let f = feature(
            r#"{"type":"Feature","properties":{"name":"Route 1","fclass":"primary","ref":"R1"},
                "geometry":{"type":"LineString","coordinates":[[139.7,35.6],[139.8,35.7]]}}"#,
        );
        let road = RoadFeature::from_geojson(&f, &PropertyNames::default());

        assert_eq!(road.name, "Route 1");
        assert_eq!(road.class_label, "primary");
        assert_eq!(road.reference, "R1");
        assert!(matches!(road.geometry, Some(Value::LineString(_))));
        assert!(road.is_named());
    }

    #[test]
    fn test_missing_and_null_properties_are_empty() {
        let f = feature(r#"{"type":"Feature","properties":{"name":null},"geometry":null}"#);
        let road = RoadFeature::from_geojson(&f, &PropertyNames::default());

        assert_eq!(road.name, "");
        assert_eq!(road.class_label, "");
        assert_eq!(road.reference, "");
        assert!(road.geometry.is_none());
        assert!(!road.is_named());

        let f = feature(r#"{"type":"Feature","properties":null,"geometry":null}"#);
        let road = RoadFeature::from_geojson(&f, &PropertyNames::default());
        assert!(!road.is_named());
    }

    #[test]
    fn test_numeric_ref_rendered_as_text() {
        let f = feature(
            r#"{"type":"Feature","properties":{"name":"国道246号","fclass":"trunk","ref":246},"geometry":null}"#,
        );
        let road = RoadFeature::from_geojson(&f, &PropertyNames::default());
        assert_eq!(road.reference, "246");
    }

    #[test]
    fn test_custom_property_names() {
        let f = feature(
            r#"{"type":"Feature","properties":{"label":"A1","highway":"motorway","code":"E1"},"geometry":null}"#,
        );
        let names = PropertyNames {
            name: "label".to_string(),
            class: "highway".to_string(),
            reference: "code".to_string(),
        };
        let road = RoadFeature::from_geojson(&f, &names);
        assert_eq!(road.name, "A1");
        assert_eq!(road.class_label, "motorway");
        assert_eq!(road.reference, "E1");
    }
}
