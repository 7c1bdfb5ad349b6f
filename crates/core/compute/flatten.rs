//! Flattening nested GeoJSON geometries into their positions.

use geojson::Value;

/// Lazy, single-pass sequence of the positions of one geometry.
pub type Positions<'a> = Box<dyn Iterator<Item = &'a [f64]> + 'a>;

/// Every position of `value`, in document order.
///
/// Rings, parts and collection members are visited depth-first, so a
/// Polygon with holes yields its exterior ring and then each hole. Nothing
/// is deduplicated: a closed ring yields its closing position twice.
///
/// # Examples
///
/// ```
/// use geojson::Value;
/// use roadindex::compute::flatten::flatten;
///
/// let square = Value::Polygon(vec![vec![
///     vec![0.0, 0.0],
///     vec![1.0, 0.0],
///     vec![1.0, 1.0],
///     vec![0.0, 0.0],
/// ]]);
/// assert_eq!(flatten(&square).count(), 4);
/// ```
pub fn flatten(value: &Value) -> Positions<'_> {
    match value {
        Value::Point(position) => Box::new(std::iter::once(position.as_slice())),
        Value::MultiPoint(positions) | Value::LineString(positions) => {
            Box::new(positions.iter().map(Vec::as_slice))
        }
        Value::MultiLineString(lines) | Value::Polygon(lines) => {
            Box::new(lines.iter().flatten().map(Vec::as_slice))
        }
        Value::MultiPolygon(polygons) => {
            Box::new(polygons.iter().flatten().flatten().map(Vec::as_slice))
        }
        Value::GeometryCollection(geometries) => {
            Box::new(geometries.iter().flat_map(|geometry| flatten(&geometry.value)))
        }
    }
}

/// Like [`flatten`], but an absent geometry yields nothing.
pub fn flatten_optional(value: Option<&Value>) -> Positions<'_> {
    match value {
        Some(value) => flatten(value),
        None => Box::new(std::iter::empty()),
    }
}
