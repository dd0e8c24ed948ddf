//! Street-lighting estimate from area classification and time of day.

use rand::Rng;

use crate::area::AreaType;

/// Lowest possible light score.
pub const MIN_LIGHT_SCORE: u8 = 40;
/// Highest possible light score.
pub const MAX_LIGHT_SCORE: u8 = 100;
/// Multiplier applied to the base score during [`is_dark_hour`] hours.
pub const NIGHT_FACTOR: f64 = 0.8;

/// Whether street lighting is the only light at `hour` (18:00–06:59).
#[must_use]
pub const fn is_dark_hour(hour: u32) -> bool {
    hour >= 18 || hour <= 6
}

/// Estimate street lighting on a scale of 40–100.
///
/// The area's base score is scaled by [`NIGHT_FACTOR`] after dark, nudged by
/// a uniform variation in `[-10, 5)` and clamped.
///
/// # Examples
/// ```
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use saferoute_core::{AreaType, estimate_light_score};
///
/// let mut rng = ChaCha8Rng::seed_from_u64(1);
/// let score = estimate_light_score(AreaType::Commercial, 12, &mut rng);
/// assert!((80..=95).contains(&score));
/// ```
pub fn estimate_light_score<R>(area: AreaType, hour: u32, rng: &mut R) -> u8
where
    R: Rng + ?Sized,
{
    let factor = if is_dark_hour(hour) { NIGHT_FACTOR } else { 1.0 };
    let variation = rng.gen_range(-10.0..5.0);
    let raw = (area.lighting_base() * factor + variation).round();
    let clamped = raw.clamp(f64::from(MIN_LIGHT_SCORE), f64::from(MAX_LIGHT_SCORE));
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value is clamped to 40..=100"
    )]
    let score = clamped as u8;
    score
}
