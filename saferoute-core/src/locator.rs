//! Locate amenities along a route.
//!
//! One query is issued per anchor from [`crate::sampler`], with bounded
//! parallelism and a per-query deadline. Results are merged in anchor order
//! under a minimum-separation rule, then ranked by distance from the route.
//!
//! Every failure is absorbed here: a query that errors or times out counts as
//! "no places near this anchor" and never cancels its siblings.
//!
//! Timeouts use Tokio's timer, so the returned futures must be polled inside a
//! Tokio runtime with the time driver enabled.

use std::time::Duration;

use futures_util::stream::{self, StreamExt as _};

use crate::amenity::{AmenityCategory, AmenityRecord};
use crate::analyzer::AnalyzerConfig;
use crate::geodesic::{GeoPoint, distance, min_distance};
use crate::place_search::{PlaceQuery, PlaceRecord, PlaceSearch};
use crate::route::RoutePath;
use crate::sampler::{sample_anchors, sample_vertices};

/// Find up to `config.amenity_cap` places of `category` near `path`.
///
/// Any two returned records are at least `config.min_separation_m` apart and
/// the list is sorted by distance from the route, nearest first.
pub async fn locate_amenities<P>(
    search: &P,
    path: &RoutePath,
    category: AmenityCategory,
    config: &AnalyzerConfig,
) -> Vec<AmenityRecord>
where
    P: PlaceSearch + ?Sized,
{
    let anchors = sample_anchors(path);
    let parallelism = anchors.len().clamp(1, config.max_parallel_queries.max(1));
    let queries: Vec<PlaceQuery> = anchors
        .into_iter()
        .map(|anchor| {
            PlaceQuery::new(
                anchor,
                config.search_radius_m,
                category,
                config.per_anchor_limit,
            )
        })
        .collect();

    // `buffered` keeps anchor order so the merge is deterministic.
    let batches: Vec<Vec<PlaceRecord>> = stream::iter(queries.iter())
        .map(|query| query_with_timeout(search, query, config.query_timeout))
        .buffered(parallelism)
        .collect()
        .await;

    let answered = batches.iter().filter(|batch| !batch.is_empty()).count();
    let route_sample = sample_vertices(path, config.route_sample_size);
    let records = merge_records(
        batches,
        category,
        &route_sample,
        config.min_separation_m,
        config.amenity_cap,
    );
    log::debug!(
        "located {} {category} records from {answered}/{} anchors",
        records.len(),
        queries.len()
    );
    records
}

/// Run one query under `timeout`, mapping any failure to an empty list.
pub(crate) async fn query_with_timeout<P>(
    search: &P,
    query: &PlaceQuery,
    timeout: Duration,
) -> Vec<PlaceRecord>
where
    P: PlaceSearch + ?Sized,
{
    match tokio::time::timeout(timeout, search.search_nearby(query)).await {
        Ok(Ok(records)) => records,
        Ok(Err(err)) => {
            log::warn!(
                "{} search near ({:.5}, {:.5}) failed: {err}",
                query.category,
                query.center.lat,
                query.center.lng
            );
            Vec::new()
        }
        Err(_) => {
            log::warn!(
                "{} search near ({:.5}, {:.5}) timed out after {:?}",
                query.category,
                query.center.lat,
                query.center.lng,
                timeout
            );
            Vec::new()
        }
    }
}

/// Merge per-anchor batches under the minimum-separation rule.
///
/// Candidates are scanned in order; one closer than `min_separation_m` to an
/// already accepted record is dropped. Survivors are sorted by distance from
/// `route_sample` and truncated to `cap`. A linear scan is fine at the sizes
/// involved (tens of candidates).
#[must_use]
pub fn merge_records(
    batches: Vec<Vec<PlaceRecord>>,
    category: AmenityCategory,
    route_sample: &[GeoPoint],
    min_separation_m: f64,
    cap: usize,
) -> Vec<AmenityRecord> {
    let mut accepted: Vec<AmenityRecord> = Vec::new();
    for place in batches.into_iter().flatten() {
        if !place.location.is_finite() {
            log::debug!("skipping {category} '{}' without a usable location", place.name);
            continue;
        }
        let crowded = accepted
            .iter()
            .any(|kept| distance(kept.location, place.location) < min_separation_m);
        if crowded {
            continue;
        }
        let from_route = min_distance(place.location, route_sample);
        accepted.push(AmenityRecord::from_place(category, place, from_route));
    }
    accepted.sort_by(|a, b| a.distance_from_route_m.total_cmp(&b.distance_from_route_m));
    accepted.truncate(cap);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesic::offset;
    use crate::test_support::{StubPlaceSearch, straight_path};
    use rstest::{fixture, rstest};

    #[fixture]
    fn route_sample() -> Vec<GeoPoint> {
        vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.05)]
    }

    fn place(name: &str, lat: f64, lng: f64) -> PlaceRecord {
        PlaceRecord::new(name, GeoPoint::new(lat, lng))
    }

    #[rstest]
    fn drops_candidates_inside_minimum_separation(route_sample: Vec<GeoPoint>) {
        let origin = GeoPoint::new(0.001, 0.0);
        let near = offset(origin, 300.0, 90.0);
        let far = offset(origin, 800.0, 90.0);
        let batches = vec![
            vec![PlaceRecord::new("A", origin)],
            vec![PlaceRecord::new("A-dup", near), PlaceRecord::new("B", far)],
        ];
        let merged = merge_records(batches, AmenityCategory::Hospital, &route_sample, 500.0, 10);
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[rstest]
    fn sorts_by_distance_and_truncates(route_sample: Vec<GeoPoint>) {
        let batches = vec![vec![
            place("far", 0.03, 0.02),
            place("near", 0.002, 0.0),
            place("mid", 0.01, 0.05),
        ]];
        let merged = merge_records(batches, AmenityCategory::Police, &route_sample, 500.0, 2);
        let names: Vec<&str> = merged.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["near", "mid"]);
        assert!(merged.iter().all(|r| r.category == AmenityCategory::Police));
    }

    #[rstest]
    fn skips_non_finite_locations(route_sample: Vec<GeoPoint>) {
        let batches = vec![vec![place("broken", f64::NAN, 0.0), place("ok", 0.0, 0.01)]];
        let merged = merge_records(batches, AmenityCategory::Hospital, &route_sample, 500.0, 10);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].name, "ok");
    }

    #[rstest]
    fn merged_records_respect_separation_pairwise(route_sample: Vec<GeoPoint>) {
        let batch: Vec<PlaceRecord> = (0..40)
            .map(|i| place(&format!("p{i}"), 0.0, f64::from(i) * 0.001))
            .collect();
        let merged =
            merge_records(vec![batch], AmenityCategory::Hospital, &route_sample, 500.0, 40);
        for (i, a) in merged.iter().enumerate() {
            for b in merged.iter().skip(i + 1) {
                assert!(distance(a.location, b.location) >= 500.0);
            }
        }
    }

    #[tokio::test]
    async fn failed_anchor_degrades_to_partial_results() {
        let path = straight_path(3, 0.05);
        let points = path.points().to_vec();
        let search = StubPlaceSearch::new()
            .with_places_near(points[0], vec![PlaceRecord::new("first", points[0])])
            .with_failure_near(points[1])
            .with_places_near(points[2], vec![PlaceRecord::new("last", points[2])]);
        let config = AnalyzerConfig::default();

        let records = locate_amenities(&search, &path, AmenityCategory::Hospital, &config).await;

        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names.len(), 2);
        assert!(names.contains(&"first") && names.contains(&"last"));
        assert_eq!(search.calls(), 3);
    }

    #[tokio::test]
    async fn slow_anchor_times_out_without_cancelling_siblings() {
        let path = straight_path(3, 0.05);
        let points = path.points().to_vec();
        let search = StubPlaceSearch::new()
            .with_places_near(points[0], vec![PlaceRecord::new("first", points[0])])
            .with_delay_near(points[1], Duration::from_secs(30))
            .with_places_near(points[2], vec![PlaceRecord::new("last", points[2])]);
        let config = AnalyzerConfig::default().with_query_timeout(Duration::from_millis(50));

        let records = locate_amenities(&search, &path, AmenityCategory::Police, &config).await;

        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn every_anchor_failing_yields_empty_list() {
        let path = straight_path(4, 0.05);
        let search = StubPlaceSearch::failing();
        let records =
            locate_amenities(&search, &path, AmenityCategory::Hospital, &AnalyzerConfig::default())
                .await;
        assert!(records.is_empty());
    }
}
