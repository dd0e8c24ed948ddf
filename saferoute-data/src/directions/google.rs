//! Google Directions API response types.
//!
//! See: <https://developers.google.com/maps/documentation/directions/get-directions>

use saferoute_core::{CandidateRoute, DirectionsError, RouteMetadata, RoutePath, decode_polyline};
use serde::Deserialize;

/// Directions API response.
///
/// `status` is `"OK"` on success; any other value (`"NOT_FOUND"`,
/// `"ZERO_RESULTS"`, `"REQUEST_DENIED"`, ...) comes with no usable routes.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code from the service.
    pub status: String,
    /// Optional detail when `status` is not `"OK"`.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Routes in the order the service ranked them.
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// One route from origin to destination.
#[derive(Debug, Deserialize)]
pub struct Route {
    /// Short description naming the main roads.
    #[serde(default)]
    pub summary: String,
    /// Legs between waypoints; without waypoints there is exactly one.
    #[serde(default)]
    pub legs: Vec<Leg>,
    /// Simplified geometry of the whole route.
    pub overview_polyline: Polyline,
}

/// A leg of a route.
#[derive(Debug, Deserialize)]
pub struct Leg {
    /// Leg length.
    pub distance: Option<TextValue>,
    /// Leg travel time.
    pub duration: Option<TextValue>,
}

/// A measurement with its display text.
#[derive(Debug, Deserialize)]
pub struct TextValue {
    /// Human-readable value, e.g. `"12.4 km"`.
    #[serde(default)]
    pub text: String,
    /// Value in metres or seconds.
    pub value: u64,
}

/// Encoded polyline wrapper.
#[derive(Debug, Deserialize)]
pub struct Polyline {
    /// Encoded points.
    pub points: String,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == "OK"
    }

    /// Convert the response into candidate routes, indexed in response order.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionsError::Service`] when the status is not `"OK"`,
    /// and [`DirectionsError::Polyline`] or [`DirectionsError::InvalidPath`]
    /// naming the first route whose geometry is unusable.
    pub fn into_routes(self) -> Result<Vec<CandidateRoute>, DirectionsError> {
        if !self.is_ok() {
            return Err(DirectionsError::Service {
                status: self.status,
                message: self.error_message.unwrap_or_default(),
            });
        }

        self.routes
            .into_iter()
            .enumerate()
            .map(|(index, route)| route.into_candidate(index))
            .collect()
    }
}

impl Route {
    fn into_candidate(self, index: usize) -> Result<CandidateRoute, DirectionsError> {
        let points = decode_polyline(&self.overview_polyline.points)
            .map_err(|source| DirectionsError::Polyline { index, source })?;
        let path = RoutePath::new(points)
            .map_err(|source| DirectionsError::InvalidPath { index, source })?;

        let mut metadata = RouteMetadata {
            summary: self.summary,
            ..RouteMetadata::default()
        };
        if let Some(leg) = self.legs.into_iter().next() {
            if let Some(distance) = leg.distance {
                metadata.distance_meters = distance.value;
                metadata.distance_text = distance.text;
            }
            if let Some(duration) = leg.duration {
                metadata.duration_seconds = duration.value;
                metadata.duration_text = duration.text;
            }
        }
        Ok(CandidateRoute::new(index, path, metadata))
    }
}
