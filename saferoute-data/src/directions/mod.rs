//! HTTP directions provider backed by the Google Directions API.
//!
//! [`HttpDirections`] implements [`saferoute_core::DirectionsProvider`]. Each
//! returned route keeps the service's order as its index, takes distance and
//! duration from its first leg, and decodes `overview_polyline` into a
//! [`saferoute_core::RoutePath`].

mod google;
mod provider;

pub use google::{DirectionsResponse, Leg, Polyline, Route, TextValue};
pub use provider::{DEFAULT_DIRECTIONS_BASE_URL, HttpDirections, HttpDirectionsConfig};
