//! Safety-relevant places found near a route.
//!
//! Coordinates are WGS84 degrees. An [`AmenityRecord`] is created from a
//! provider's [`PlaceRecord`](crate::PlaceRecord) once its distance from the
//! route is known.

use crate::geodesic::GeoPoint;
use crate::place_search::PlaceRecord;

/// Kind of place requested from the place-search collaborator.
///
/// # Examples
/// ```
/// use saferoute_core::AmenityCategory;
///
/// assert_eq!(AmenityCategory::Hospital.as_str(), "hospital");
/// assert_eq!(AmenityCategory::Police.to_string(), "police");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum AmenityCategory {
    /// Hospitals and emergency medical care.
    Hospital,
    /// Police stations.
    Police,
    /// Fuel stations, the closest stand-in for roadside assistance.
    FuelStation,
    /// Hotels and other staffed lodging usable as a safe space.
    Lodging,
}

impl AmenityCategory {
    /// Every category, in lookup order.
    pub const ALL: [Self; 4] = [Self::Hospital, Self::Police, Self::FuelStation, Self::Lodging];

    /// Return the category as a lowercase `&str`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Police => "police",
            Self::FuelStation => "fuel_station",
            Self::Lodging => "lodging",
        }
    }

    /// Name used when a provider omits one.
    #[must_use]
    pub const fn fallback_name(&self) -> &'static str {
        match self {
            Self::Hospital => "Unknown Hospital",
            Self::Police => "Police Station",
            Self::FuelStation => "Gas Station",
            Self::Lodging => "Hotel",
        }
    }

    /// Phone number used when a provider omits one.
    #[must_use]
    pub const fn fallback_phone(&self) -> &'static str {
        match self {
            Self::Hospital | Self::Lodging => "Emergency: 112",
            Self::Police => "Emergency: 100",
            Self::FuelStation => "Roadside: 1073",
        }
    }
}

impl std::fmt::Display for AmenityCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AmenityCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hospital" | "medical" => Ok(Self::Hospital),
            "police" | "law-enforcement" => Ok(Self::Police),
            "fuel_station" | "gas_station" => Ok(Self::FuelStation),
            "lodging" | "hotel" => Ok(Self::Lodging),
            _ => Err(format!("unknown amenity category '{s}'")),
        }
    }
}

/// A place retained for a route, with its estimated distance from the route.
///
/// `distance_from_route_m` is measured to a sample of the route's vertices,
/// so it is an upper bound on the true distance to the polyline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AmenityRecord {
    /// Category the record was requested under.
    pub category: AmenityCategory,
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact number.
    pub phone: String,
    /// Geospatial position.
    pub location: GeoPoint,
    /// Estimated distance from the route, in metres.
    pub distance_from_route_m: f64,
}

impl AmenityRecord {
    /// Attach a route distance to a provider record.
    ///
    /// # Examples
    /// ```
    /// use saferoute_core::{AmenityCategory, AmenityRecord, GeoPoint, PlaceRecord};
    ///
    /// let place = PlaceRecord::new("City Hospital", GeoPoint::new(17.4, 78.5));
    /// let record = AmenityRecord::from_place(AmenityCategory::Hospital, place, 120.0);
    /// assert_eq!(record.name, "City Hospital");
    /// assert_eq!(record.distance_from_route_m, 120.0);
    /// ```
    #[must_use]
    pub fn from_place(category: AmenityCategory, place: PlaceRecord, distance_m: f64) -> Self {
        Self {
            category,
            name: place.name,
            address: place.address,
            phone: place.phone,
            location: place.location,
            distance_from_route_m: distance_m,
        }
    }
}
