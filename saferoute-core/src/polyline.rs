//! Encoded-polyline decoding (precision 1e5) for directions responses.

use geo::LineString;
use thiserror::Error;

use crate::geodesic::GeoPoint;

/// Decimal places encoded by the directions provider.
pub const POLYLINE_PRECISION: u32 = 5;

/// Errors returned by [`decode_polyline`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolylineError {
    /// The input is truncated, uses bytes outside the encoding alphabet or
    /// decodes to coordinates outside the valid range.
    #[error("malformed encoded polyline: {reason}")]
    Malformed {
        /// Decoder diagnostic, including the offending byte position.
        reason: String,
    },
}

/// Decode an encoded polyline into points.
///
/// An empty string decodes to an empty list.
///
/// # Errors
/// Returns [`PolylineError::Malformed`] when the input cannot be decoded.
///
/// # Examples
/// ```
/// use saferoute_core::decode_polyline;
///
/// let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@")?;
/// assert_eq!(points.len(), 3);
/// assert!((points[0].lat - 38.5).abs() < 1e-9);
/// assert!((points[2].lng + 126.453).abs() < 1e-9);
/// # Ok::<(), saferoute_core::PolylineError>(())
/// ```
pub fn decode_polyline(encoded: &str) -> Result<Vec<GeoPoint>, PolylineError> {
    let line: LineString<f64> = polyline::decode_polyline(encoded, POLYLINE_PRECISION)
        .map_err(|err| PolylineError::Malformed {
            reason: err.to_string(),
        })?;
    Ok(line.into_iter().map(GeoPoint::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn decodes_reference_polyline() {
        let points = decode_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").expect("valid polyline");
        let expected = [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];
        assert_eq!(points.len(), expected.len());
        for (point, (lat, lng)) in points.iter().zip(expected) {
            assert!((point.lat - lat).abs() < 1e-9, "{point:?}");
            assert!((point.lng - lng).abs() < 1e-9, "{point:?}");
        }
    }

    #[rstest]
    fn empty_input_decodes_to_nothing() {
        assert_eq!(decode_polyline(""), Ok(Vec::new()));
    }

    #[rstest]
    #[case::latitude_without_longitude("_p~iF")]
    #[case::byte_below_alphabet("_p iF~ps|U")]
    fn malformed_input_is_rejected(#[case] raw: &str) {
        let err = decode_polyline(raw).expect_err("malformed polyline");
        assert!(matches!(err, PolylineError::Malformed { .. }), "{err:?}");
        assert!(err.to_string().starts_with("malformed encoded polyline"));
    }
}
