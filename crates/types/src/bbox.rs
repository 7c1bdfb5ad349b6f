use geo::Coord;
use serde::{Deserialize, Serialize};

/// A 2D axis-aligned bounding box in longitude/latitude.
///
/// Serialized as `[min_lng, min_lat, max_lng, max_lat]`, the layout used by
/// the search index file.
///
/// A box starts out as [`BoundingBox::EMPTY`], an inverted box that any real
/// coordinate shrinks into place. Bounds only ever move outward while
/// coordinates are folded in with [`BoundingBox::extend`] or
/// [`BoundingBox::merge`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    /// Minimum longitude
    pub min_x: f64,
    /// Minimum latitude
    pub min_y: f64,
    /// Maximum longitude
    pub max_x: f64,
    /// Maximum latitude
    pub max_y: f64,
}

impl BoundingBox {
    /// The inverted sentinel box `[180, 90, -180, -90]`.
    ///
    /// Every coordinate in the WGS84 range lowers the minimums and raises the
    /// maximums past their sentinel values.
    pub const EMPTY: Self = Self {
        min_x: 180.0,
        min_y: 90.0,
        max_x: -180.0,
        max_y: -90.0,
    };

    /// Create a new bounding box from minimum and maximum coordinates.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadindex_types::bbox::BoundingBox;
    ///
    /// let bbox = BoundingBox::new(139.6, 35.5, 139.8, 35.7);
    /// assert_eq!(bbox.to_array(), [139.6, 35.5, 139.8, 35.7]);
    /// ```
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// True while no coordinate has been folded in.
    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    /// Grow the box to cover `coord`.
    pub fn extend(&mut self, coord: Coord) {
        self.min_x = self.min_x.min(coord.x);
        self.min_y = self.min_y.min(coord.y);
        self.max_x = self.max_x.max(coord.x);
        self.max_y = self.max_y.max(coord.y);
    }

    /// Grow the box to cover `other`.
    ///
    /// Merging an empty box is a no-op, and merging is commutative and
    /// associative, so partial boxes may be combined in any order.
    pub fn merge(&mut self, other: &BoundingBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Copy of this box with every bound rounded to `precision` decimal digits.
    ///
    /// Rounding goes through the exact decimal expansion of each bound, so
    /// `10.123456` becomes `10.12346` rather than whatever `x * 1e5` happens
    /// to land on.
    pub fn rounded(&self, precision: u32) -> Self {
        Self::new(
            round_to(self.min_x, precision),
            round_to(self.min_y, precision),
            round_to(self.max_x, precision),
            round_to(self.max_y, precision),
        )
    }

    /// `[min_lng, min_lat, max_lng, max_lat]`
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x, self.min_y, self.max_x, self.max_y]
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(bounds: [f64; 4]) -> Self {
        Self::new(bounds[0], bounds[1], bounds[2], bounds[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(bbox: BoundingBox) -> Self {
        bbox.to_array()
    }
}

fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.*}", precision as usize, value)
        .parse()
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_box_is_inverted() {
        let bbox = BoundingBox::EMPTY;
        assert!(bbox.is_empty());
        assert_eq!(BoundingBox::default(), BoundingBox::EMPTY);
    }

    #[test]
    fn test_extend_single_coord_collapses_sentinel() {
        let mut bbox = BoundingBox::EMPTY;
        bbox.extend(geo::coord! { x: 139.7, y: 35.6 });

        assert!(!bbox.is_empty());
        assert_eq!(bbox.to_array(), [139.7, 35.6, 139.7, 35.6]);
    }

    #[test]
    fn test_extend_is_order_independent() {
        let coords = [
            geo::coord! { x: 10.0, y: 20.0 },
            geo::coord! { x: 5.0, y: 25.0 },
            geo::coord! { x: 7.5, y: 22.0 },
        ];

        let mut forward = BoundingBox::EMPTY;
        coords.iter().for_each(|c| forward.extend(*c));

        let mut backward = BoundingBox::EMPTY;
        coords.iter().rev().for_each(|c| backward.extend(*c));

        assert_eq!(forward, backward);
        assert_eq!(forward.to_array(), [5.0, 20.0, 10.0, 25.0]);
    }

    #[test]
    fn test_merge_with_empty_is_noop() {
        let mut bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
        bbox.merge(&BoundingBox::EMPTY);
        assert_eq!(bbox, BoundingBox::new(1.0, 2.0, 3.0, 4.0));

        let mut empty = BoundingBox::EMPTY;
        empty.merge(&bbox);
        assert_eq!(empty, bbox);
    }

    #[test]
    fn test_rounded_uses_decimal_rounding() {
        let bbox = BoundingBox::new(10.123454, -33.000004, 10.123456, 35.123455_1);
        let rounded = bbox.rounded(5);

        assert_eq!(rounded.min_x, 10.12345);
        assert_eq!(rounded.min_y, -33.0);
        assert_eq!(rounded.max_x, 10.12346);
        assert_eq!(rounded.max_y, 35.12346);
    }

    #[test]
    fn test_rounded_keeps_sentinel() {
        assert_eq!(BoundingBox::EMPTY.rounded(5), BoundingBox::EMPTY);
    }

    #[test]
    fn test_serializes_as_array() {
        let bbox = BoundingBox::new(139.6, 35.5, 139.8, 35.7);
        let json = serde_json::to_string(&bbox).unwrap();
        assert_eq!(json, "[139.6,35.5,139.8,35.7]");

        let parsed: BoundingBox = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, bbox);
    }
}
