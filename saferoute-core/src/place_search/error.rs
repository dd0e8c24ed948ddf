use thiserror::Error;

/// Errors from [`crate::place_search::PlaceSearch::search_nearby`].
///
/// The route analyzer never surfaces these to its caller: a failed query
/// degrades to an empty result for that anchor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaceSearchError {
    /// The query radius was zero, negative or not finite.
    #[error("search radius must be a positive finite number of metres")]
    InvalidRadius,
    /// The request did not complete before the deadline.
    #[error("place search to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested endpoint.
        url: String,
        /// Timeout that elapsed, in whole seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("place search to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Requested endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description from the client.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("place search to {url} failed: {message}")]
    NetworkError {
        /// Requested endpoint.
        url: String,
        /// Error description from the client.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse place search response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
}
