//! Synthetic incident generation around a route.
//!
//! Incidents are scattered around route vertices rather than placed on them,
//! drawn from the static catalog with high-severity types weighted more
//! heavily. All randomness comes from the caller's generator, so a seeded
//! generator reproduces the same incidents.

use chrono::{NaiveDateTime, TimeDelta};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::area::AreaType;
use crate::crime::{CrimeIncident, CrimeType};
use crate::geodesic::{GeoPoint, offset};
use crate::route::RoutePath;

/// Closest an incident is placed to its base vertex, in metres.
pub const MIN_OFFSET_M: f64 = 50.0;
/// Furthest an incident is placed from its base vertex, in metres.
pub const MAX_OFFSET_M: f64 = 300.0;
/// Extra per-axis scatter in degrees (about 50 m).
pub const JITTER_DEG: f64 = 0.0005;
/// Oldest incident age in hours.
pub const MAX_HOURS_AGO: u32 = 48;

/// Incident types repeated by their severity weight.
fn weighted_pool() -> Vec<CrimeType> {
    CrimeType::ALL
        .iter()
        .flat_map(|kind| std::iter::repeat_n(*kind, kind.severity().weight()))
        .collect()
}

/// Generate incidents around `path` for a route classified as `area`.
///
/// The count is drawn from [`AreaType::incident_range`]. Each incident sits
/// 50–300 m from a random vertex (plus jitter) and is 1–48 hours older than
/// `now`. The result is ordered by severity, high first, then most recent
/// first.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use saferoute_core::{AreaType, GeoPoint, RoutePath, synthesize_incidents};
///
/// let path = RoutePath::new(vec![GeoPoint::new(17.385, 78.486), GeoPoint::new(17.44, 78.35)])?;
/// let now = NaiveDate::from_ymd_opt(2024, 3, 9).and_then(|d| d.and_hms_opt(21, 0, 0)).unwrap();
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let incidents = synthesize_incidents(&path, AreaType::Residential, now, &mut rng);
/// assert!((2..=6).contains(&incidents.len()));
/// # Ok::<(), saferoute_core::RoutePathError>(())
/// ```
pub fn synthesize_incidents<R>(
    path: &RoutePath,
    area: AreaType,
    now: NaiveDateTime,
    rng: &mut R,
) -> Vec<CrimeIncident>
where
    R: Rng + ?Sized,
{
    let pool = weighted_pool();
    let count = rng.gen_range(area.incident_range());
    let mut incidents = Vec::with_capacity(count);
    for _ in 0..count {
        let (Some(kind), Some(base)) = (pool.choose(rng), path.points().choose(rng)) else {
            break;
        };
        incidents.push(scatter(*kind, *base, now, rng));
    }
    incidents.sort_by_key(|incident| (incident.severity, incident.hours_ago));
    log::debug!(
        "synthesized {} incidents for {area} route of {} vertices",
        incidents.len(),
        path.len()
    );
    incidents
}

fn scatter<R>(kind: CrimeType, base: GeoPoint, now: NaiveDateTime, rng: &mut R) -> CrimeIncident
where
    R: Rng + ?Sized,
{
    let offset_m = rng.gen_range(MIN_OFFSET_M..=MAX_OFFSET_M);
    let bearing = rng.gen_range(0.0..360.0);
    let placed = offset(base, offset_m, bearing);
    let location = GeoPoint::new(
        placed.lat + rng.gen_range(-JITTER_DEG..=JITTER_DEG),
        placed.lng + rng.gen_range(-JITTER_DEG..=JITTER_DEG),
    );
    let hours_ago = rng.gen_range(1..=MAX_HOURS_AGO);
    let timestamp = now
        .checked_sub_signed(TimeDelta::hours(i64::from(hours_ago)))
        .unwrap_or(now);
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "offset is within 50..=300"
    )]
    let distance_from_route_m = offset_m.round() as u32;
    CrimeIncident::new(kind, location, timestamp, hours_ago, distance_from_route_m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesic::distance;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .and_then(|date| date.and_hms_opt(14, 30, 0))
            .expect("valid timestamp")
    }

    #[fixture]
    fn path() -> RoutePath {
        RoutePath::new(vec![
            GeoPoint::new(17.385, 78.4867),
            GeoPoint::new(17.40, 78.47),
            GeoPoint::new(17.4239, 78.4483),
        ])
        .expect("valid path")
    }

    #[rstest]
    fn pool_weights_by_severity() {
        let pool = weighted_pool();
        let robberies = pool.iter().filter(|k| **k == CrimeType::Robbery).count();
        let thefts = pool.iter().filter(|k| **k == CrimeType::Theft).count();
        let frauds = pool.iter().filter(|k| **k == CrimeType::Fraud).count();
        assert_eq!((robberies, thefts, frauds), (3, 2, 1));
        assert_eq!(pool.len(), 2 * 3 + 4 * 2 + 2);
    }

    #[rstest]
    fn counts_stay_within_area_range(path: RoutePath, now: NaiveDateTime) {
        for area in AreaType::ALL {
            let range = area.incident_range();
            for seed in 0..50 {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let incidents = synthesize_incidents(&path, area, now, &mut rng);
                assert!(range.contains(&incidents.len()), "{area} seed {seed}");
            }
        }
    }

    #[rstest]
    fn same_seed_reproduces_incidents(path: RoutePath, now: NaiveDateTime) {
        let first =
            synthesize_incidents(&path, AreaType::Urban, now, &mut ChaCha8Rng::seed_from_u64(99));
        let second =
            synthesize_incidents(&path, AreaType::Urban, now, &mut ChaCha8Rng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[rstest]
    fn sorted_by_severity_then_recency(path: RoutePath, now: NaiveDateTime) {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let incidents = synthesize_incidents(&path, AreaType::Commercial, now, &mut rng);
        for pair in incidents.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!((a.severity, a.hours_ago) <= (b.severity, b.hours_ago));
        }
    }

    #[rstest]
    fn incidents_are_scattered_near_the_route(path: RoutePath, now: NaiveDateTime) {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let incidents = synthesize_incidents(&path, AreaType::Industrial, now, &mut rng);
        for incident in &incidents {
            let nearest = path
                .points()
                .iter()
                .map(|p| distance(*p, incident.location))
                .fold(f64::INFINITY, f64::min);
            // 300 m offset plus up to ~80 m of diagonal jitter.
            assert!(nearest < 400.0, "{nearest}");
            assert!((50..=300).contains(&incident.distance_from_route_m));
            assert!((1..=48).contains(&incident.hours_ago));
            assert_eq!(
                now - incident.timestamp,
                TimeDelta::hours(i64::from(incident.hours_ago))
            );
        }
    }

    #[rstest]
    fn single_point_path_still_synthesizes(now: NaiveDateTime) {
        let path = RoutePath::new(vec![GeoPoint::new(51.5, -0.12)]).expect("valid path");
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let incidents = synthesize_incidents(&path, AreaType::MainRoad, now, &mut rng);
        assert!(!incidents.is_empty());
        assert!(incidents.iter().all(|i| i.severity == i.kind.severity()));
    }
}
