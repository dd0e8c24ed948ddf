//! Crime and composite safety scores.
//!
//! Both scores live on `0..=100`. The composite score weights amenity
//! presence and the absence of crime most heavily, with lighting and route
//! length as smaller modifiers:
//!
//! ```text
//! safety = clamp(0, 100, round(
//!     min(15·hospitals, 30) + min(15·police, 30)
//!   + 0.3·light + 0.4·max(0, 100 − crime) + 0.2·max(0, 100 − 10·km)))
//! ```

use crate::crime::{CrimeIncident, SeverityCounts};
use crate::geodesic::{GeoPoint, min_distance};

/// Upper bound of every score in this module.
pub const MAX_SCORE: u8 = 100;

const AMENITY_POINTS: f64 = 15.0;
const AMENITY_CAP: f64 = 30.0;
const PROXIMITY_POINTS: u32 = 10;

/// Inputs to [`safety_score`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScoreInputs {
    /// Hospitals found along the route.
    pub hospitals: usize,
    /// Police stations found along the route.
    pub police: usize,
    /// Street-lighting estimate.
    pub light_score: u8,
    /// Crime risk from [`crime_score`].
    pub crime_score: u8,
    /// Route length in kilometres.
    pub distance_km: f64,
}

/// Crime risk of a route on `0..=100`.
///
/// Each incident contributes 30, 15 or 5 points by severity, plus 10 more when
/// it lies within `proximity_m` of any point in `route_sample`. Returns zero
/// when there are no incidents.
///
/// # Examples
/// ```
/// use saferoute_core::crime_score;
///
/// assert_eq!(crime_score(&[], &[], 100.0), 0);
/// ```
#[must_use]
pub fn crime_score(incidents: &[CrimeIncident], route_sample: &[GeoPoint], proximity_m: f64) -> u8 {
    let near_route = incidents
        .iter()
        .filter(|incident| min_distance(incident.location, route_sample) < proximity_m)
        .count();
    let proximity = PROXIMITY_POINTS.saturating_mul(u32::try_from(near_route).unwrap_or(u32::MAX));
    let total = SeverityCounts::tally(incidents)
        .risk_points()
        .saturating_add(proximity);
    u8::try_from(total.min(u32::from(MAX_SCORE))).unwrap_or(MAX_SCORE)
}

/// Composite safety score on `0..=100`.
///
/// Non-finite intermediate results score zero.
///
/// # Examples
/// ```
/// use saferoute_core::{ScoreInputs, safety_score};
///
/// let inputs = ScoreInputs {
///     hospitals: 0,
///     police: 0,
///     light_score: 35,
///     crime_score: 85,
///     distance_km: 10.0,
/// };
/// assert_eq!(safety_score(&inputs), 17);
/// ```
#[must_use]
pub fn safety_score(inputs: &ScoreInputs) -> u8 {
    let hospitals = amenity_points(inputs.hospitals);
    let police = amenity_points(inputs.police);
    let light = 0.3 * f64::from(inputs.light_score);
    let crime = 0.4 * (100.0 - f64::from(inputs.crime_score)).max(0.0);
    let length = 0.2 * (100.0 - 10.0 * inputs.distance_km).max(0.0);
    sanitise(hospitals + police + light + crime + length)
}

fn amenity_points(count: usize) -> f64 {
    // Anything past two already hits the cap.
    let count = u32::try_from(count.min(2)).unwrap_or(2);
    (AMENITY_POINTS * f64::from(count)).min(AMENITY_CAP)
}

/// Round and clamp a raw score, mapping non-finite values to zero.
fn sanitise(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 0;
    }
    let clamped = raw.round().clamp(0.0, f64::from(MAX_SCORE));
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to 0..=100"
    )]
    let score = clamped as u8;
    score
}
