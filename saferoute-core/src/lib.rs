//! Route safety scoring engine.
//!
//! Given candidate routes between two endpoints, the engine locates hospitals
//! and police stations along each route, synthesizes nearby incidents from a
//! static catalog, estimates street lighting, and combines everything into a
//! bounded safety score with short advisories. Routes are then ranked, safest
//! first.
//!
//! External services sit behind the [`PlaceSearch`] and
//! [`DirectionsProvider`] traits; randomness and the wall clock are supplied
//! by the caller so results are reproducible.

pub mod amenity;
pub mod analyzer;
pub mod area;
pub mod assessment;
pub mod crime;
pub mod directions;
pub mod emergency;
pub mod geodesic;
pub mod lighting;
pub mod locator;
pub mod place_search;
pub mod polyline;
pub mod ranking;
pub mod route;
pub mod sampler;
pub mod scorer;
pub mod synthesizer;
pub mod warnings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use amenity::{AmenityCategory, AmenityRecord};
pub use analyzer::{AnalysisContext, AnalysisError, AnalyzerConfig, RouteAnalyzer};
pub use area::AreaType;
pub use assessment::SafetyAssessment;
pub use crime::{CatalogEntry, CrimeIncident, CrimeType, Severity, SeverityCounts};
pub use directions::{DirectionsError, DirectionsProvider, DirectionsRequest, Endpoint};
pub use emergency::{EMERGENCY_TIPS, EmergencyServices, NearbyService, find_emergency_services};
pub use geodesic::{GeoPoint, distance};
pub use lighting::estimate_light_score;
pub use locator::locate_amenities;
pub use place_search::{PlaceQuery, PlaceRecord, PlaceSearch, PlaceSearchError};
pub use polyline::{PolylineError, decode_polyline};
pub use ranking::rank_assessments;
pub use route::{CandidateRoute, RouteMetadata, RoutePath, RoutePathError};
pub use scorer::{ScoreInputs, crime_score, safety_score};
pub use synthesizer::synthesize_incidents;
pub use warnings::{SafetyWarning, generate_warnings};
