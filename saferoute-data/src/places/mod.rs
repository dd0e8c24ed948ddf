//! HTTP place search backed by Google Places (New).
//!
//! [`HttpPlaceSearch`] implements [`saferoute_core::PlaceSearch`] by posting
//! a distance-ranked `places:searchNearby` request per query. Each amenity
//! category maps to one Google place type; places the service returns
//! without a location are dropped, and missing names, addresses or phone
//! numbers fall back to per-category defaults.
//!
//! ```no_run
//! use std::time::Duration;
//! use saferoute_data::places::{HttpPlaceSearch, HttpPlaceSearchConfig};
//!
//! let config = HttpPlaceSearchConfig::new("https://places.googleapis.com")
//!     .with_api_key("my-key")
//!     .with_timeout(Duration::from_secs(5));
//! let search = HttpPlaceSearch::with_config(config)?;
//! # let _ = search;
//! # Ok::<(), saferoute_data::ProviderBuildError>(())
//! ```

mod google;
mod provider;

pub use google::{
    FALLBACK_ADDRESS, FIELD_MASK, LatLng, LocalizedText, MAX_RADIUS_M, MAX_RESULT_COUNT, Place,
    SearchNearbyRequest, SearchNearbyResponse, place_type,
};
pub use provider::{DEFAULT_PLACES_BASE_URL, HttpPlaceSearch, HttpPlaceSearchConfig};
