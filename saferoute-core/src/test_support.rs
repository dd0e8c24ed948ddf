//! Deterministic collaborators and fixtures for unit and behaviour tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::area::AreaType;
use crate::assessment::SafetyAssessment;
use crate::directions::{DirectionsError, DirectionsProvider, DirectionsRequest};
use crate::geodesic::{GeoPoint, distance};
use crate::place_search::{PlaceQuery, PlaceRecord, PlaceSearch, PlaceSearchError};
use crate::route::{CandidateRoute, RouteMetadata, RoutePath};

/// Queries centred within this distance of a scripted point match it.
const MATCH_TOLERANCE_M: f64 = 1.0;

#[derive(Debug, Clone)]
enum Script {
    Places(Vec<PlaceRecord>),
    Failure,
    Delay(Duration),
}

/// Scripted [`PlaceSearch`] keyed by query centre.
///
/// Queries near a scripted point get that point's response; any other query
/// gets an empty list. The same script answers every category. Responses are
/// truncated to the query's `max_results`.
///
/// # Examples
/// ```
/// use saferoute_core::test_support::StubPlaceSearch;
/// use saferoute_core::{AmenityCategory, GeoPoint, PlaceQuery, PlaceRecord, PlaceSearch};
///
/// let centre = GeoPoint::new(0.0, 0.0);
/// let search =
///     StubPlaceSearch::new().with_places_near(centre, vec![PlaceRecord::new("A", centre)]);
/// let query = PlaceQuery::new(centre, 3_000.0, AmenityCategory::Hospital, 5);
///
/// let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
/// let records = runtime.block_on(search.search_nearby(&query))?;
/// assert_eq!(records.len(), 1);
/// assert_eq!(search.calls(), 1);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Default)]
pub struct StubPlaceSearch {
    scripts: Vec<(GeoPoint, Script)>,
    fail_all: bool,
    calls: AtomicUsize,
}

impl StubPlaceSearch {
    /// A provider that finds nothing anywhere.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A provider whose every query fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Answer queries near `centre` with `places`.
    #[must_use]
    pub fn with_places_near(mut self, centre: GeoPoint, places: Vec<PlaceRecord>) -> Self {
        self.scripts.push((centre, Script::Places(places)));
        self
    }

    /// Fail queries near `centre`.
    #[must_use]
    pub fn with_failure_near(mut self, centre: GeoPoint) -> Self {
        self.scripts.push((centre, Script::Failure));
        self
    }

    /// Stall queries near `centre` for `delay` before answering with nothing.
    #[must_use]
    pub fn with_delay_near(mut self, centre: GeoPoint, delay: Duration) -> Self {
        self.scripts.push((centre, Script::Delay(delay)));
        self
    }

    /// Number of queries received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn script_for(&self, centre: GeoPoint) -> Option<&Script> {
        self.scripts
            .iter()
            .find(|(point, _)| distance(*point, centre) <= MATCH_TOLERANCE_M)
            .map(|(_, script)| script)
    }
}

#[async_trait]
impl PlaceSearch for StubPlaceSearch {
    async fn search_nearby(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceRecord>, PlaceSearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        query.validate()?;
        if self.fail_all {
            return Err(stub_failure());
        }
        match self.script_for(query.center) {
            Some(Script::Places(places)) => {
                Ok(places.iter().take(query.max_results).cloned().collect())
            }
            Some(Script::Failure) => Err(stub_failure()),
            Some(Script::Delay(delay)) => {
                tokio::time::sleep(*delay).await;
                Ok(Vec::new())
            }
            None => Ok(Vec::new()),
        }
    }
}

fn stub_failure() -> PlaceSearchError {
    PlaceSearchError::NetworkError {
        url: "stub://places".to_owned(),
        message: "scripted failure".to_owned(),
    }
}

/// Scripted [`DirectionsProvider`] returning fixed routes or a fixed error.
#[derive(Debug, Clone)]
pub struct StubDirections {
    response: Result<Vec<CandidateRoute>, DirectionsError>,
}

impl StubDirections {
    /// Answer every request with `routes`.
    #[must_use]
    pub const fn with_routes(routes: Vec<CandidateRoute>) -> Self {
        Self {
            response: Ok(routes),
        }
    }

    /// Answer every request with `error`.
    #[must_use]
    pub const fn with_error(error: DirectionsError) -> Self {
        Self {
            response: Err(error),
        }
    }
}

#[async_trait]
impl DirectionsProvider for StubDirections {
    async fn routes(
        &self,
        _request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, DirectionsError> {
        self.response.clone()
    }
}

/// A path of `count` points heading east from the origin, `step_deg` degrees
/// of longitude apart. `count` is floored at one.
///
/// # Panics
/// Panics if `step_deg` is not finite.
#[must_use]
pub fn straight_path(count: u32, step_deg: f64) -> RoutePath {
    let points = (0..count.max(1))
        .map(|i| GeoPoint::new(0.0, f64::from(i) * step_deg))
        .collect();
    RoutePath::new(points).unwrap_or_else(|err| panic!("straight path is valid: {err}"))
}

/// A candidate route along `path` with the given summary.
#[must_use]
pub fn candidate(index: usize, path: RoutePath, summary: &str) -> CandidateRoute {
    let metadata = RouteMetadata {
        summary: summary.to_owned(),
        ..RouteMetadata::default()
    };
    CandidateRoute::new(index, path, metadata)
}

/// An otherwise empty assessment with the given index and safety score.
#[must_use]
pub fn assessment_with_score(route_index: usize, safety_score: u8) -> SafetyAssessment {
    SafetyAssessment {
        route_index,
        metadata: RouteMetadata::default(),
        area_type: AreaType::Urban,
        hospital_count: 0,
        police_count: 0,
        hospitals: Vec::new(),
        police_stations: Vec::new(),
        incidents: Vec::new(),
        light_score: 40,
        crime_score: 0,
        safety_score,
        warnings: Vec::new(),
    }
}
