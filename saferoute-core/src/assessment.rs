//! Per-route safety assessment.

use crate::amenity::AmenityRecord;
use crate::area::AreaType;
use crate::crime::CrimeIncident;
use crate::route::RouteMetadata;
use crate::warnings::SafetyWarning;

/// Everything computed for one candidate route.
///
/// Produced by [`RouteAnalyzer`](crate::RouteAnalyzer) and immutable
/// afterwards. `light_score` is in `40..=100`; `crime_score` and
/// `safety_score` are in `0..=100`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SafetyAssessment {
    /// Position of the route in the directions response.
    pub route_index: usize,
    /// Distance, duration and summary reported for the route.
    pub metadata: RouteMetadata,
    /// Classification used for incident density and lighting.
    pub area_type: AreaType,
    /// Number of hospitals found.
    pub hospital_count: usize,
    /// Number of police stations found.
    pub police_count: usize,
    /// Hospitals, nearest to the route first.
    pub hospitals: Vec<AmenityRecord>,
    /// Police stations, nearest to the route first.
    pub police_stations: Vec<AmenityRecord>,
    /// Synthetic incidents, high severity first.
    pub incidents: Vec<CrimeIncident>,
    /// Street-lighting estimate.
    pub light_score: u8,
    /// Crime risk.
    pub crime_score: u8,
    /// Composite safety score.
    pub safety_score: u8,
    /// At most three advisories, highest priority first. Each serializes
    /// with its human-readable message.
    pub warnings: Vec<SafetyWarning>,
}

