//! Great-circle helpers shared by every stage of route analysis.
//!
//! Coordinates are WGS84 degrees. Distances are metres on a spherical Earth,
//! which is ample for ranking routes but not for survey work.

use geo::Coord;

/// Mean Earth radius used by [`distance`], in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Approximate length of one degree of latitude, in metres.
pub const METRES_PER_DEGREE: f64 = 111_000.0;

/// A latitude/longitude pair in degrees.
///
/// # Examples
/// ```
/// use saferoute_core::GeoPoint;
///
/// let point = GeoPoint::new(17.385, 78.4867);
/// assert!(point.is_finite());
/// assert_eq!(point.lat, 17.385);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl GeoPoint {
    /// Construct a point from latitude and longitude.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

impl From<Coord<f64>> for GeoPoint {
    /// `geo` stores longitude in `x` and latitude in `y`.
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.lng,
            y: point.lat,
        }
    }
}

/// Haversine distance between `a` and `b` in metres.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, distance};
///
/// let a = GeoPoint::new(0.0, 0.0);
/// let b = GeoPoint::new(0.0, 1.0);
/// let metres = distance(a, b);
/// assert!((metres - 111_194.9).abs() < 1.0);
/// ```
#[must_use]
pub fn distance(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let dphi = (b.lat - a.lat).to_radians();
    let dlambda = (b.lng - a.lng).to_radians();
    let h = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    // Rounding can push `h` a hair above one for antipodal points.
    2.0 * EARTH_RADIUS_M * h.sqrt().min(1.0).asin()
}

/// Smallest distance from `point` to any of `candidates`, in metres.
///
/// Returns `f64::INFINITY` when `candidates` is empty.
#[must_use]
pub fn min_distance(point: GeoPoint, candidates: &[GeoPoint]) -> f64 {
    candidates
        .iter()
        .map(|candidate| distance(point, *candidate))
        .fold(f64::INFINITY, f64::min)
}

/// Move `origin` by `distance_m` metres along `bearing_deg` (clockwise from
/// north) using a flat-earth approximation.
///
/// Longitude offsets are stretched by the cosine of the origin latitude. The
/// cosine is floored so that points at the poles stay finite.
#[must_use]
pub fn offset(origin: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let bearing = bearing_deg.to_radians();
    let lat_scale = origin.lat.to_radians().cos().abs().max(1e-6);
    let lat = origin.lat + (distance_m / METRES_PER_DEGREE) * bearing.cos();
    let lng = origin.lng + (distance_m / (METRES_PER_DEGREE * lat_scale)) * bearing.sin();
    GeoPoint::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn distance_to_self_is_zero() {
        let point = GeoPoint::new(17.385, 78.4867);
        assert_eq!(distance(point, point), 0.0);
    }

    #[rstest]
    fn distance_is_symmetric() {
        let a = GeoPoint::new(17.385, 78.4867);
        let b = GeoPoint::new(17.4401, 78.3489);
        assert!((distance(a, b) - distance(b, a)).abs() < 1e-9);
    }

    #[rstest]
    #[case(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0), 111_194.9)]
    #[case(GeoPoint::new(17.385, 78.4867), GeoPoint::new(17.4401, 78.3489), 15_853.0)]
    fn distance_matches_known_values(
        #[case] a: GeoPoint,
        #[case] b: GeoPoint,
        #[case] expected: f64,
    ) {
        let actual = distance(a, b);
        assert!(
            (actual - expected).abs() / expected < 0.01,
            "expected ~{expected}, got {actual}"
        );
    }

    #[rstest]
    fn antipodal_distance_is_half_circumference() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 180.0);
        let expected = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!((distance(a, b) - expected).abs() < 1.0);
    }

    #[rstest]
    #[case(0.0)]
    #[case(90.0)]
    #[case(225.0)]
    fn offset_moves_roughly_the_requested_distance(#[case] bearing: f64) {
        let origin = GeoPoint::new(17.385, 78.4867);
        let moved = offset(origin, 200.0, bearing);
        let travelled = distance(origin, moved);
        assert!((travelled - 200.0).abs() < 5.0, "travelled {travelled}");
    }

    #[rstest]
    fn offset_stays_finite_at_the_pole() {
        let moved = offset(GeoPoint::new(90.0, 0.0), 100.0, 90.0);
        assert!(moved.is_finite());
    }

    #[rstest]
    fn min_distance_of_empty_slice_is_infinite() {
        assert!(min_distance(GeoPoint::default(), &[]).is_infinite());
    }

    #[rstest]
    fn geo_coord_round_trip_swaps_axes() {
        let coord = Coord { x: 78.4867, y: 17.385 };
        let point = GeoPoint::from(coord);
        assert_eq!(point, GeoPoint::new(17.385, 78.4867));
        assert_eq!(Coord::from(point), coord);
    }
}
