//! HTTP collaborators for the saferoute engine.
//!
//! The core crate talks to external services only through the
//! [`saferoute_core::PlaceSearch`] and [`saferoute_core::DirectionsProvider`]
//! traits. This crate implements both against Google's web services using
//! `reqwest`:
//!
//! - [`places::HttpPlaceSearch`] posts `places:searchNearby` requests.
//! - [`directions::HttpDirections`] fetches alternative routes from the
//!   Directions API.
//!
//! Both are configured the same way: a `*Config` built from a base URL,
//! with optional API key, timeout and user agent.

mod client;
pub mod directions;
pub mod places;

pub use client::{DEFAULT_USER_AGENT, ProviderBuildError};
pub use directions::{HttpDirections, HttpDirectionsConfig};
pub use places::{HttpPlaceSearch, HttpPlaceSearchConfig};
