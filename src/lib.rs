//! Facade crate for the saferoute route safety engine.
//!
//! This crate re-exports the core domain types and exposes the HTTP-backed
//! place search and directions collaborators behind the `http` feature.

#![forbid(unsafe_code)]

pub use saferoute_core::{
    AmenityCategory, AmenityRecord, AnalysisContext, AnalysisError, AnalyzerConfig, AreaType,
    CandidateRoute, CrimeIncident, CrimeType, DirectionsError, DirectionsProvider,
    DirectionsRequest, EMERGENCY_TIPS, EmergencyServices, GeoPoint, NearbyService, PlaceQuery,
    PlaceRecord, PlaceSearch, PlaceSearchError, RouteAnalyzer, RouteMetadata, RoutePath,
    SafetyAssessment, SafetyWarning, Severity, find_emergency_services, rank_assessments,
};

#[cfg(feature = "http")]
pub use saferoute_data::{
    HttpDirections, HttpDirectionsConfig, HttpPlaceSearch, HttpPlaceSearchConfig,
    ProviderBuildError,
};

#[cfg(feature = "test-support")]
pub use saferoute_core::test_support;
