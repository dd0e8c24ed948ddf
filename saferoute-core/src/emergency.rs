//! Emergency services near a single point.
//!
//! Used when a traveller raises an alert: each category is looked up in
//! parallel, and a category whose lookup fails is simply left empty.

use std::time::Duration;

use futures_util::future::join4;

use crate::amenity::AmenityCategory;
use crate::geodesic::{GeoPoint, distance};
use crate::locator::query_with_timeout;
use crate::place_search::{PlaceQuery, PlaceRecord, PlaceSearch};

/// Safety advice returned with every lookup.
pub const EMERGENCY_TIPS: [&str; 6] = [
    "Stay calm and move to a well-lit, populated area immediately",
    "Call 100 for police, 102 for ambulance, or 112 for general emergency",
    "Share your live location with trusted contacts",
    "If you feel unsafe, enter the nearest shop, hotel, or public building",
    "Keep your phone charged and emergency numbers readily accessible",
    "Trust your instincts - if something feels wrong, seek help immediately",
];

/// Search radius, provider request size and kept count for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Lookup {
    category: AmenityCategory,
    radius_m: f64,
    requested: usize,
    kept: usize,
}

impl Lookup {
    const fn for_category(category: AmenityCategory) -> Self {
        match category {
            AmenityCategory::Hospital => Self {
                category,
                radius_m: 5_000.0,
                requested: 10,
                kept: 5,
            },
            AmenityCategory::Police | AmenityCategory::FuelStation | AmenityCategory::Lodging => {
                Self {
                    category,
                    radius_m: 3_000.0,
                    requested: 5,
                    kept: 3,
                }
            }
        }
    }
}

/// A service near the requested point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NearbyService {
    /// Display name.
    pub name: String,
    /// Postal address.
    pub address: String,
    /// Contact number.
    pub phone: String,
    /// Geospatial position.
    pub location: GeoPoint,
    /// Great-circle distance from the requested point, in metres.
    pub distance_m: f64,
}

impl NearbyService {
    fn from_place(place: PlaceRecord, origin: GeoPoint) -> Self {
        Self {
            distance_m: distance(origin, place.location),
            name: place.name,
            address: place.address,
            phone: place.phone,
            location: place.location,
        }
    }

    /// Distance formatted in kilometres, e.g. `"1.4 km"`.
    #[must_use]
    pub fn distance_label(&self) -> String {
        format!("{:.1} km", self.distance_m / 1_000.0)
    }
}

/// Nearby services grouped by category, nearest first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmergencyServices {
    /// Point the lookup was made for.
    pub location: GeoPoint,
    /// Up to five hospitals within 5 km.
    pub hospitals: Vec<NearbyService>,
    /// Up to three police stations within 3 km.
    pub police_stations: Vec<NearbyService>,
    /// Up to three fuel stations within 3 km.
    pub fuel_stations: Vec<NearbyService>,
    /// Up to three staffed lodgings within 3 km.
    pub lodging: Vec<NearbyService>,
    /// Fixed safety advice.
    pub tips: Vec<String>,
}

impl EmergencyServices {
    /// Whether no service of any category was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        AmenityCategory::ALL
            .into_iter()
            .all(|category| self.by_category(category).is_empty())
    }

    /// Services of one category.
    #[must_use]
    pub fn by_category(&self, category: AmenityCategory) -> &[NearbyService] {
        match category {
            AmenityCategory::Hospital => &self.hospitals,
            AmenityCategory::Police => &self.police_stations,
            AmenityCategory::FuelStation => &self.fuel_stations,
            AmenityCategory::Lodging => &self.lodging,
        }
    }
}

/// Look up hospitals, police, fuel stations and lodging around `location`.
///
/// Each category is queried once, in parallel, under `timeout`. Results are
/// sorted by distance from `location` and truncated per category.
pub async fn find_emergency_services<P>(
    search: &P,
    location: GeoPoint,
    timeout: Duration,
) -> EmergencyServices
where
    P: PlaceSearch + ?Sized,
{
    let lookup = |category| nearest(search, location, Lookup::for_category(category), timeout);
    let (hospitals, police_stations, fuel_stations, lodging) = join4(
        lookup(AmenityCategory::Hospital),
        lookup(AmenityCategory::Police),
        lookup(AmenityCategory::FuelStation),
        lookup(AmenityCategory::Lodging),
    )
    .await;
    let services = EmergencyServices {
        location,
        hospitals,
        police_stations,
        fuel_stations,
        lodging,
        tips: EMERGENCY_TIPS.iter().map(|tip| (*tip).to_owned()).collect(),
    };
    if services.is_empty() {
        log::warn!(
            "no emergency services found near ({:.5}, {:.5})",
            location.lat,
            location.lng
        );
    } else {
        log::info!(
            "found {} hospitals, {} police, {} fuel stations, {} lodgings near ({:.5}, {:.5})",
            services.hospitals.len(),
            services.police_stations.len(),
            services.fuel_stations.len(),
            services.lodging.len(),
            location.lat,
            location.lng
        );
    }
    services
}

async fn nearest<P>(
    search: &P,
    origin: GeoPoint,
    lookup: Lookup,
    timeout: Duration,
) -> Vec<NearbyService>
where
    P: PlaceSearch + ?Sized,
{
    let query = PlaceQuery::new(origin, lookup.radius_m, lookup.category, lookup.requested);
    let mut services: Vec<NearbyService> = query_with_timeout(search, &query, timeout)
        .await
        .into_iter()
        .filter(|place| place.location.is_finite())
        .map(|place| NearbyService::from_place(place, origin))
        .collect();
    services.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
    services.truncate(lookup.kept);
    services
}
