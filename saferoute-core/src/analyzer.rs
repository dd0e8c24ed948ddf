//! Single-route and multi-route safety analysis.
//!
//! [`RouteAnalyzer`] ties the pieces together: anchors are sampled, hospitals
//! and police stations located concurrently, incidents synthesized, lighting
//! estimated, and the results scored. [`RouteAnalyzer::analyze_all`] runs the
//! whole pipeline for every candidate concurrently and ranks the results.

use std::time::Duration;

use chrono::{NaiveDateTime, Timelike};
use futures_util::future::{join, join_all};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::amenity::AmenityCategory;
use crate::area::AreaType;
use crate::assessment::SafetyAssessment;
use crate::lighting::estimate_light_score;
use crate::locator::locate_amenities;
use crate::place_search::PlaceSearch;
use crate::ranking::rank_assessments;
use crate::route::CandidateRoute;
use crate::sampler::sample_vertices;
use crate::scorer::{ScoreInputs, crime_score, safety_score};
use crate::synthesizer::synthesize_incidents;
use crate::warnings::generate_warnings;

const DEFAULT_SEARCH_RADIUS_M: f64 = 3_000.0;
const DEFAULT_MIN_SEPARATION_M: f64 = 500.0;
const DEFAULT_AMENITY_CAP: usize = 10;
const DEFAULT_PER_ANCHOR_LIMIT: usize = 10;
const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 5;
const DEFAULT_MAX_PARALLEL_QUERIES: usize = 8;
const DEFAULT_CRIME_PROXIMITY_M: f64 = 100.0;
const DEFAULT_SAMPLE_SIZE: usize = 50;

/// Tunables for [`RouteAnalyzer`].
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzerConfig {
    /// Radius of each per-anchor place query, in metres.
    pub search_radius_m: f64,
    /// Closest two records of one category may be, in metres.
    pub min_separation_m: f64,
    /// Most records kept per category and route.
    pub amenity_cap: usize,
    /// Most records requested from the provider per anchor.
    pub per_anchor_limit: usize,
    /// Deadline for each place query.
    pub query_timeout: Duration,
    /// Most place queries in flight for one category.
    pub max_parallel_queries: usize,
    /// Incidents closer than this to the route add proximity risk.
    pub crime_proximity_m: f64,
    /// Route vertices sampled for the proximity check.
    pub crime_sample_size: usize,
    /// Route vertices sampled for amenity distance-from-route.
    pub route_sample_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            search_radius_m: DEFAULT_SEARCH_RADIUS_M,
            min_separation_m: DEFAULT_MIN_SEPARATION_M,
            amenity_cap: DEFAULT_AMENITY_CAP,
            per_anchor_limit: DEFAULT_PER_ANCHOR_LIMIT,
            query_timeout: Duration::from_secs(DEFAULT_QUERY_TIMEOUT_SECS),
            max_parallel_queries: DEFAULT_MAX_PARALLEL_QUERIES,
            crime_proximity_m: DEFAULT_CRIME_PROXIMITY_M,
            crime_sample_size: DEFAULT_SAMPLE_SIZE,
            route_sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl AnalyzerConfig {
    /// Set the per-anchor search radius.
    #[must_use]
    pub fn with_search_radius(mut self, metres: f64) -> Self {
        self.search_radius_m = metres;
        self
    }

    /// Set the minimum separation between records of one category.
    #[must_use]
    pub fn with_min_separation(mut self, metres: f64) -> Self {
        self.min_separation_m = metres;
        self
    }

    /// Set the per-category result cap.
    #[must_use]
    pub fn with_amenity_cap(mut self, cap: usize) -> Self {
        self.amenity_cap = cap;
        self
    }

    /// Set the per-anchor provider result limit.
    #[must_use]
    pub fn with_per_anchor_limit(mut self, limit: usize) -> Self {
        self.per_anchor_limit = limit;
        self
    }

    /// Set the deadline for each place query.
    #[must_use]
    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Set the bound on concurrent place queries.
    #[must_use]
    pub fn with_max_parallel_queries(mut self, max: usize) -> Self {
        self.max_parallel_queries = max;
        self
    }

    /// Set the crime proximity threshold.
    #[must_use]
    pub fn with_crime_proximity(mut self, metres: f64) -> Self {
        self.crime_proximity_m = metres;
        self
    }
}

/// Wall clock and seed for one analysis request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisContext {
    /// Local time at the start of the trip.
    pub now: NaiveDateTime,
    /// Seed for incident synthesis and lighting variation.
    pub seed: u64,
}

impl AnalysisContext {
    /// Construct a context.
    #[must_use]
    pub const fn new(now: NaiveDateTime, seed: u64) -> Self {
        Self { now, seed }
    }

    /// Generator for the route at `route_index`.
    ///
    /// Every route draws from its own ChaCha stream, so the result for one
    /// route does not depend on how many others are analyzed alongside it.
    #[must_use]
    pub fn rng_for(&self, route_index: usize) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        rng.set_stream(u64::try_from(route_index).unwrap_or(u64::MAX));
        rng
    }
}

/// Errors returned by [`RouteAnalyzer::analyze_all`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// No candidate routes were supplied.
    #[error("no candidate routes to analyze")]
    NoRoutes,
}

/// Scores candidate routes against a place-search collaborator.
///
/// # Examples
/// ```
/// use async_trait::async_trait;
/// use chrono::NaiveDate;
/// use saferoute_core::{
///     AnalysisContext, CandidateRoute, GeoPoint, PlaceQuery, PlaceRecord, PlaceSearch,
///     PlaceSearchError, RouteAnalyzer, RouteMetadata, RoutePath,
/// };
///
/// struct Nothing;
///
/// #[async_trait]
/// impl PlaceSearch for Nothing {
///     async fn search_nearby(
///         &self,
///         _query: &PlaceQuery,
///     ) -> Result<Vec<PlaceRecord>, PlaceSearchError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let path = RoutePath::new(vec![GeoPoint::new(17.385, 78.486), GeoPoint::new(17.42, 78.45)])?;
/// let route = CandidateRoute::new(0, path, RouteMetadata::default());
/// let now = NaiveDate::from_ymd_opt(2024, 3, 9).and_then(|d| d.and_hms_opt(12, 0, 0)).unwrap();
/// let analyzer = RouteAnalyzer::new(Nothing);
///
/// let runtime = tokio::runtime::Builder::new_current_thread().enable_time().build()?;
/// let ranked = runtime.block_on(analyzer.analyze_all(&[route], &AnalysisContext::new(now, 1)))?;
/// assert_eq!(ranked.len(), 1);
/// assert_eq!(ranked[0].hospital_count, 0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct RouteAnalyzer<P> {
    search: P,
    config: AnalyzerConfig,
}

impl<P: PlaceSearch> RouteAnalyzer<P> {
    /// Create an analyzer with default tunables.
    pub fn new(search: P) -> Self {
        Self::with_config(search, AnalyzerConfig::default())
    }

    /// Create an analyzer with explicit tunables.
    pub const fn with_config(search: P, config: AnalyzerConfig) -> Self {
        Self { search, config }
    }

    /// Tunables in use.
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The place-search collaborator.
    pub const fn search(&self) -> &P {
        &self.search
    }

    /// Assess one route.
    ///
    /// Never fails: unavailable amenity data shows up as zero counts and the
    /// matching warnings.
    pub async fn analyze<R>(
        &self,
        route: &CandidateRoute,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> SafetyAssessment
    where
        R: Rng + Send + ?Sized,
    {
        let path = &route.path;
        let area_type = AreaType::classify_summary(&route.metadata.summary);
        let hour = now.hour();

        let incidents = synthesize_incidents(path, area_type, now, rng);
        let light_score = estimate_light_score(area_type, hour, rng);
        let crime_score = crime_score(
            &incidents,
            &sample_vertices(path, self.config.crime_sample_size),
            self.config.crime_proximity_m,
        );

        let (hospitals, police_stations) = join(
            locate_amenities(&self.search, path, AmenityCategory::Hospital, &self.config),
            locate_amenities(&self.search, path, AmenityCategory::Police, &self.config),
        )
        .await;

        let inputs = ScoreInputs {
            hospitals: hospitals.len(),
            police: police_stations.len(),
            light_score,
            crime_score,
            distance_km: route.distance_km(),
        };
        let safety_score = safety_score(&inputs);
        let warnings = generate_warnings(
            &incidents,
            inputs.hospitals,
            inputs.police,
            light_score,
            hour,
        );
        if inputs.hospitals == 0 && inputs.police == 0 {
            log::warn!("route {} has no hospitals or police stations nearby", route.index);
        }
        log::debug!(
            "route {}: {} hospitals, {} police, {} incidents, \
             light {light_score}, crime {crime_score}, safety {safety_score}",
            route.index,
            inputs.hospitals,
            inputs.police,
            incidents.len()
        );

        SafetyAssessment {
            route_index: route.index,
            metadata: route.metadata.clone(),
            area_type,
            hospital_count: inputs.hospitals,
            police_count: inputs.police,
            hospitals,
            police_stations,
            incidents,
            light_score,
            crime_score,
            safety_score,
            warnings,
        }
    }

    /// Assess every route concurrently and rank them, safest first.
    ///
    /// # Errors
    /// Returns [`AnalysisError::NoRoutes`] when `routes` is empty.
    pub async fn analyze_all(
        &self,
        routes: &[CandidateRoute],
        context: &AnalysisContext,
    ) -> Result<Vec<SafetyAssessment>, AnalysisError> {
        if routes.is_empty() {
            return Err(AnalysisError::NoRoutes);
        }
        let assessments = join_all(routes.iter().map(|route| async move {
            let mut rng = context.rng_for(route.index);
            self.analyze(route, context.now, &mut rng).await
        }))
        .await;
        let ranked = rank_assessments(assessments);
        if let Some(best) = ranked.first() {
            log::info!(
                "analyzed {} routes; safest is route {} with score {}",
                ranked.len(),
                best.route_index,
                best.safety_score
            );
        }
        Ok(ranked)
    }
}
