//! Pick a handful of anchor points along a route.
//!
//! Each anchor becomes the centre of one place-search query, so the anchor
//! count bounds the number of external lookups per route. Anchors are spread
//! by distance travelled rather than by vertex index, which keeps coverage
//! even when the provider packs vertices densely around junctions.

use crate::geodesic::GeoPoint;
use crate::route::RoutePath;

/// Paths with at most this many vertices use every vertex as an anchor.
pub const MAX_UNCOMPRESSED_VERTICES: usize = 10;

/// Target spacing between anchors on long paths, in metres.
pub const ANCHOR_SPACING_M: f64 = 4_500.0;

/// Fewest anchors used for a compressed path.
pub const MIN_ANCHORS: usize = 3;

/// Most anchors used for a compressed path.
pub const MAX_ANCHORS: usize = 8;

/// Vertex indices chosen as anchors, in travel order.
///
/// The first and last vertex are always included. Paths longer than
/// [`MAX_UNCOMPRESSED_VERTICES`] yield between [`MIN_ANCHORS`] and
/// [`MAX_ANCHORS`] indices; interior anchors sit on the vertex whose
/// cumulative distance is closest to `i * L / (n - 1)`.
///
/// # Examples
/// ```
/// use saferoute_core::{GeoPoint, RoutePath, sampler::anchor_indices};
///
/// let points = (0..30).map(|i| GeoPoint::new(0.0, f64::from(i) * 0.01)).collect();
/// let path = RoutePath::new(points)?;
/// let anchors = anchor_indices(&path);
/// assert_eq!(anchors.first(), Some(&0));
/// assert_eq!(anchors.last(), Some(&29));
/// # Ok::<(), saferoute_core::RoutePathError>(())
/// ```
#[must_use]
pub fn anchor_indices(path: &RoutePath) -> Vec<usize> {
    let len = path.len();
    if len <= MAX_UNCOMPRESSED_VERTICES {
        return (0..len).collect();
    }

    let total = path.length_m();
    let count = anchor_count(total);
    let cumulative = path.cumulative_distances();
    let last = len - 1;

    let mut indices = Vec::with_capacity(count);
    indices.push(0);
    let segments = (count - 1) as f64;
    for i in 1..count - 1 {
        let target = i as f64 * total / segments;
        indices.push(nearest_by_distance(cumulative, target));
    }
    indices.push(last);
    log::debug!("sampled {count} anchors from {len} vertices over {total:.0} m");
    indices
}

/// Anchor points along `path`, in travel order.
#[must_use]
pub fn sample_anchors(path: &RoutePath) -> Vec<GeoPoint> {
    let points = path.points();
    anchor_indices(path)
        .into_iter()
        .filter_map(|index| points.get(index).copied())
        .collect()
}

/// Number of anchors for a compressed path of `length_m` metres.
///
/// `clamp(floor(L / 4.5 km) + 1, 3, 8)`.
#[must_use]
pub fn anchor_count(length_m: f64) -> usize {
    let spans = (length_m.max(0.0) / ANCHOR_SPACING_M).floor();
    // Saturating float-to-int conversion; the clamp bounds the result anyway.
    let count = (spans as usize).saturating_add(1);
    count.clamp(MIN_ANCHORS, MAX_ANCHORS)
}

/// Evenly strided subset of at most `max` vertices, always keeping the first
/// and last vertex.
///
/// Used wherever a cheap approximation of "distance to the route" is needed.
/// It measures distance to vertices, not to the polyline between them, so it
/// overestimates for points beside long straight segments.
#[must_use]
pub fn sample_vertices(path: &RoutePath, max: usize) -> Vec<GeoPoint> {
    let points = path.points();
    let len = points.len();
    let max = max.max(2);
    if len <= max {
        return points.to_vec();
    }
    (0..max)
        .filter_map(|i| points.get(i * (len - 1) / (max - 1)).copied())
        .collect()
}

/// Index of the vertex whose cumulative distance is closest to `target`.
///
/// Ties resolve to the earlier vertex.
fn nearest_by_distance(cumulative: &[f64], target: f64) -> usize {
    let upper = cumulative.partition_point(|&d| d < target);
    let Some(&after) = cumulative.get(upper) else {
        return cumulative.len().saturating_sub(1);
    };
    match upper.checked_sub(1).and_then(|lower| cumulative.get(lower).map(|d| (lower, *d))) {
        Some((lower, before)) if target - before <= after - target => lower,
        _ => upper,
    }
}
