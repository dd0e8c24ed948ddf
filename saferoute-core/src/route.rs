//! Candidate routes and the point paths they follow.
//!
//! A [`RoutePath`] is never empty and never holds non-finite coordinates, so
//! every downstream stage can assume at least one usable vertex.

use thiserror::Error;

use crate::geodesic::{GeoPoint, distance};

/// Errors returned by [`RoutePath::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutePathError {
    /// No points were supplied.
    #[error("route path must contain at least one point")]
    Empty,
    /// A point had a NaN or infinite component.
    #[error("route point {index} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// Position of the offending point.
        index: usize,
    },
}

/// An ordered sequence of points in travel order.
///
/// Cumulative distances are computed once at construction and are
/// monotonically non-decreasing.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, RoutePath};
///
/// let path = RoutePath::new(vec![
///     GeoPoint::new(0.0, 0.0),
///     GeoPoint::new(0.0, 0.01),
/// ])?;
/// assert_eq!(path.len(), 2);
/// assert!(path.length_m() > 1_000.0);
/// # Ok::<(), saferoute_core::RoutePathError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<GeoPoint>", into = "Vec<GeoPoint>")
)]
pub struct RoutePath {
    points: Vec<GeoPoint>,
    cumulative: Vec<f64>,
}

impl RoutePath {
    /// Validate `points` and precompute cumulative distances.
    ///
    /// # Errors
    /// Returns [`RoutePathError::Empty`] for an empty input and
    /// [`RoutePathError::NonFiniteCoordinate`] when any point is not finite.
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, RoutePathError> {
        if points.is_empty() {
            return Err(RoutePathError::Empty);
        }
        if let Some(index) = points.iter().position(|point| !point.is_finite()) {
            return Err(RoutePathError::NonFiniteCoordinate { index });
        }

        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        let mut previous: Option<GeoPoint> = None;
        for point in &points {
            if let Some(prev) = previous {
                total += distance(prev, *point);
            }
            cumulative.push(total);
            previous = Some(*point);
        }

        Ok(Self { points, cumulative })
    }

    /// Points in travel order.
    #[must_use]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Distance from the first point to each vertex, in metres.
    #[must_use]
    pub fn cumulative_distances(&self) -> &[f64] {
        &self.cumulative
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total path length in metres.
    #[must_use]
    pub fn length_m(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }
}

impl TryFrom<Vec<GeoPoint>> for RoutePath {
    type Error = RoutePathError;

    fn try_from(points: Vec<GeoPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<RoutePath> for Vec<GeoPoint> {
    fn from(path: RoutePath) -> Self {
        path.points
    }
}

/// Per-route details reported by the directions collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteMetadata {
    /// Reported route length in metres; `0` when unknown.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_meters: u64,
    /// Reported travel time in seconds.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_seconds: u64,
    /// Human-readable distance, e.g. `"12.4 km"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub distance_text: String,
    /// Human-readable duration, e.g. `"31 mins"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration_text: String,
    /// Provider summary naming the main roads used.
    #[cfg_attr(feature = "serde", serde(default))]
    pub summary: String,
}

/// One route between a pair of endpoints, as discovered by the directions
/// collaborator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateRoute {
    /// Discovery order; ranking ties keep this order.
    pub index: usize,
    /// Decoded path geometry.
    pub path: RoutePath,
    /// Reported distance, duration and summary.
    #[cfg_attr(feature = "serde", serde(default))]
    pub metadata: RouteMetadata,
}

impl CandidateRoute {
    /// Construct a candidate route.
    #[must_use]
    pub const fn new(index: usize, path: RoutePath, metadata: RouteMetadata) -> Self {
        Self {
            index,
            path,
            metadata,
        }
    }

    /// Route length in kilometres used for scoring.
    ///
    /// Falls back to the path's own length when the provider reported none.
    #[must_use]
    pub fn distance_km(&self) -> f64 {
        let metres = if self.metadata.distance_meters == 0 {
            self.path.length_m()
        } else {
            self.metadata.distance_meters as f64
        };
        metres / 1_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_empty_path() {
        assert_eq!(RoutePath::new(Vec::new()), Err(RoutePathError::Empty));
    }

    #[rstest]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_non_finite_points(#[case] bad: f64) {
        let points = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(bad, 0.0)];
        assert_eq!(
            RoutePath::new(points),
            Err(RoutePathError::NonFiniteCoordinate { index: 1 })
        );
    }

    #[rstest]
    fn cumulative_distances_are_monotonic() {
        let points = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.0, 0.01),
            GeoPoint::new(0.01, 0.01),
        ];
        let path = RoutePath::new(points).expect("valid path");
        let cumulative = path.cumulative_distances();
        assert_eq!(cumulative.len(), 4);
        assert_eq!(cumulative[0], 0.0);
        assert!(cumulative.windows(2).all(|pair| pair[0] <= pair[1]));
        assert_eq!(cumulative[1], cumulative[2]);
        assert_eq!(path.length_m(), cumulative[3]);
    }

    #[rstest]
    fn single_point_path_has_zero_length() {
        let path = RoutePath::new(vec![GeoPoint::new(1.0, 1.0)]).expect("valid path");
        assert_eq!(path.length_m(), 0.0);
        assert!(!path.is_empty());
    }

    #[rstest]
    #[case(12_500, 12.5)]
    #[case(0, 1.111_949)]
    fn distance_km_prefers_reported_distance(#[case] reported: u64, #[case] expected: f64) {
        let path = RoutePath::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.01)])
            .expect("valid path");
        let metadata = RouteMetadata {
            distance_meters: reported,
            ..RouteMetadata::default()
        };
        let route = CandidateRoute::new(0, path, metadata);
        assert!((route.distance_km() - expected).abs() < 1e-3);
    }
}
