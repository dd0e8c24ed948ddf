//! Google Places (New) `places:searchNearby` request and response types.
//!
//! See: <https://developers.google.com/maps/documentation/places/web-service/nearby-search>

use saferoute_core::{AmenityCategory, GeoPoint, PlaceQuery, PlaceRecord};
use serde::{Deserialize, Serialize};

/// Largest `maxResultCount` the service accepts.
pub const MAX_RESULT_COUNT: usize = 20;

/// Largest circle radius the service accepts, in metres.
pub const MAX_RADIUS_M: f64 = 50_000.0;

/// Fields requested through the `X-Goog-FieldMask` header.
pub const FIELD_MASK: &str =
    "places.displayName,places.formattedAddress,places.location,places.internationalPhoneNumber";

/// Address used when the service omits one.
pub const FALLBACK_ADDRESS: &str = "Address not available";

/// Request body for `places:searchNearby`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNearbyRequest {
    included_types: [&'static str; 1],
    max_result_count: usize,
    location_restriction: LocationRestriction,
    rank_preference: &'static str,
}

#[derive(Debug, Serialize)]
struct LocationRestriction {
    circle: Circle,
}

#[derive(Debug, Serialize)]
struct Circle {
    center: LatLng,
    radius: f64,
}

impl SearchNearbyRequest {
    /// Build a distance-ranked request for `query`, clamping the result count
    /// and radius into the ranges the service accepts.
    #[must_use]
    pub fn from_query(query: &PlaceQuery) -> Self {
        Self {
            included_types: [place_type(query.category)],
            max_result_count: query.max_results.clamp(1, MAX_RESULT_COUNT),
            location_restriction: LocationRestriction {
                circle: Circle {
                    center: LatLng {
                        latitude: query.center.lat,
                        longitude: query.center.lng,
                    },
                    radius: query.radius_m.min(MAX_RADIUS_M),
                },
            },
            rank_preference: "DISTANCE",
        }
    }
}

/// Google place type for a category.
#[must_use]
pub const fn place_type(category: AmenityCategory) -> &'static str {
    match category {
        AmenityCategory::Hospital => "hospital",
        AmenityCategory::Police => "police",
        AmenityCategory::FuelStation => "gas_station",
        AmenityCategory::Lodging => "lodging",
    }
}

/// Response body for `places:searchNearby`.
///
/// The service omits `places` entirely when nothing matched.
#[derive(Debug, Default, Deserialize)]
pub struct SearchNearbyResponse {
    /// Matching places, nearest first.
    #[serde(default)]
    pub places: Vec<Place>,
}

/// One place, restricted to the fields in [`FIELD_MASK`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Localised display name.
    pub display_name: Option<LocalizedText>,
    /// Full postal address.
    pub formatted_address: Option<String>,
    /// Position of the place.
    pub location: Option<LatLng>,
    /// Phone number in international format.
    pub international_phone_number: Option<String>,
}

/// Text with its language code.
#[derive(Debug, Default, Deserialize)]
pub struct LocalizedText {
    /// The text itself.
    #[serde(default)]
    pub text: String,
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl SearchNearbyResponse {
    /// Convert the response into place records for `category`.
    ///
    /// Places without a location are skipped. Missing or blank names,
    /// addresses and phone numbers take the category's fallbacks.
    #[must_use]
    pub fn into_records(self, category: AmenityCategory) -> Vec<PlaceRecord> {
        self.places
            .into_iter()
            .filter_map(|place| place.into_record(category))
            .collect()
    }
}

impl Place {
    fn into_record(self, category: AmenityCategory) -> Option<PlaceRecord> {
        let location = self.location?;
        let name = non_blank(self.display_name.map(|name| name.text))
            .unwrap_or_else(|| category.fallback_name().to_owned());
        let address =
            non_blank(self.formatted_address).unwrap_or_else(|| FALLBACK_ADDRESS.to_owned());
        let phone = non_blank(self.international_phone_number)
            .unwrap_or_else(|| category.fallback_phone().to_owned());
        Some(
            PlaceRecord::new(name, GeoPoint::new(location.latitude, location.longitude))
                .with_address(address)
                .with_phone(phone),
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
