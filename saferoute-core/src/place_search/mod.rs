//! Find places of a given category near a point.
//!
//! The `PlaceSearch` trait abstracts an external place-search service.
//! Callers supply a [`PlaceQuery`] and receive the provider's raw
//! [`PlaceRecord`] values, nearest first. Ranking and deduplication happen in
//! [`crate::locator`], not here.

mod error;
mod provider;

pub use error::PlaceSearchError;
pub use provider::{PlaceQuery, PlaceRecord, PlaceSearch};
