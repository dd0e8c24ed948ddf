//! Place-search trait and the query/record types it exchanges.

use async_trait::async_trait;

use crate::amenity::AmenityCategory;
use crate::geodesic::GeoPoint;

use super::error::PlaceSearchError;

/// A bounded-radius, nearest-first search request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaceQuery {
    /// Search centre.
    pub center: GeoPoint,
    /// Search radius in metres.
    pub radius_m: f64,
    /// Category of place to find.
    pub category: AmenityCategory,
    /// Upper bound on the number of records the provider should return.
    pub max_results: usize,
}

impl PlaceQuery {
    /// Construct a query.
    #[must_use]
    pub const fn new(
        center: GeoPoint,
        radius_m: f64,
        category: AmenityCategory,
        max_results: usize,
    ) -> Self {
        Self {
            center,
            radius_m,
            category,
            max_results,
        }
    }

    /// Check the radius before a request leaves the process.
    ///
    /// # Errors
    /// Returns [`PlaceSearchError::InvalidRadius`] when the radius is not a
    /// positive finite number.
    pub fn validate(&self) -> Result<(), PlaceSearchError> {
        if self.radius_m.is_finite() && self.radius_m > 0.0 {
            Ok(())
        } else {
            Err(PlaceSearchError::InvalidRadius)
        }
    }
}

/// A place as returned by the provider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceRecord {
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact number.
    pub phone: String,
    /// Geospatial position.
    pub location: GeoPoint,
}

impl PlaceRecord {
    /// Construct a record with placeholder address and phone.
    #[must_use]
    pub fn new(name: impl Into<String>, location: GeoPoint) -> Self {
        Self {
            name: name.into(),
            address: "Address not available".to_owned(),
            phone: String::new(),
            location,
        }
    }

    /// Set the postal address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Set the contact number.
    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }
}

/// Find places of one category near a point.
///
/// Implementers should return records nearest first and at most
/// `query.max_results` of them. Implementations must be `Send + Sync` so one
/// provider can serve concurrent anchor queries.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use saferoute_core::{
///     AmenityCategory, GeoPoint, PlaceQuery, PlaceRecord, PlaceSearch, PlaceSearchError,
/// };
///
/// struct OnePlace;
///
/// #[async_trait]
/// impl PlaceSearch for OnePlace {
///     async fn search_nearby(
///         &self,
///         query: &PlaceQuery,
///     ) -> Result<Vec<PlaceRecord>, PlaceSearchError> {
///         query.validate()?;
///         Ok(vec![PlaceRecord::new("Clinic", query.center)])
///     }
/// }
///
/// let runtime = tokio::runtime::Builder::new_current_thread().build()?;
/// let query = PlaceQuery::new(GeoPoint::new(0.0, 0.0), 3_000.0, AmenityCategory::Hospital, 5);
/// let records = runtime.block_on(OnePlace.search_nearby(&query))?;
/// assert_eq!(records.len(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    /// Return places matching `query`, nearest first.
    async fn search_nearby(&self, query: &PlaceQuery)
    -> Result<Vec<PlaceRecord>, PlaceSearchError>;
}

#[async_trait]
impl<T: PlaceSearch + ?Sized> PlaceSearch for Box<T> {
    async fn search_nearby(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceRecord>, PlaceSearchError> {
        (**self).search_nearby(query).await
    }
}

#[async_trait]
impl<T: PlaceSearch + ?Sized> PlaceSearch for std::sync::Arc<T> {
    async fn search_nearby(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceRecord>, PlaceSearchError> {
        (**self).search_nearby(query).await
    }
}
