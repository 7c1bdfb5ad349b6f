//! Validation for GeoJSON positions.

use geo::Coord;

/// Converts a GeoJSON position into a 2D coordinate.
///
/// The position needs at least longitude and latitude, both finite.
/// Components past the second (elevation etc.) are ignored. Returns a
/// description of the problem on failure so callers can attach the
/// feature it came from.
///
/// # Examples
///
/// ```
/// use roadindex::compute::validation::position_to_coord;
///
/// let coord = position_to_coord(&[139.7, 35.6, 12.0]).unwrap();
/// assert_eq!((coord.x, coord.y), (139.7, 35.6));
///
/// assert!(position_to_coord(&[139.7]).is_err());
/// assert!(position_to_coord(&[f64::NAN, 35.6]).is_err());
/// ```
pub fn position_to_coord(position: &[f64]) -> Result<Coord, String> {
    let &[x, y, ..] = position else {
        return Err(format!(
            "position must have at least 2 components, got {}",
            position.len()
        ));
    };

    if !x.is_finite() {
        return Err(format!("longitude must be finite, got: {}", x));
    }

    if !y.is_finite() {
        return Err(format!("latitude must be finite, got: {}", y));
    }

    Ok(Coord { x, y })
}
