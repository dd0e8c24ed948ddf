//! Directions collaborator: turn an origin and destination into candidate
//! routes.

use async_trait::async_trait;
use thiserror::Error;

use crate::polyline::PolylineError;
use crate::route::{CandidateRoute, RoutePathError};

/// Which end of a trip a [`DirectionsError::MissingEndpoint`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Where the trip starts.
    Origin,
    /// Where the trip ends.
    Destination,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Origin => "origin",
            Self::Destination => "destination",
        })
    }
}

/// Errors from building a [`DirectionsRequest`] or fetching routes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DirectionsError {
    /// The origin or destination was empty.
    #[error("{0} is required")]
    MissingEndpoint(Endpoint),
    /// The request did not complete before the deadline.
    #[error("directions request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested endpoint.
        url: String,
        /// Timeout that elapsed, in whole seconds.
        timeout_secs: u64,
    },
    /// The service answered with a non-success HTTP status.
    #[error("directions request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Requested endpoint.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description from the client.
        message: String,
    },
    /// The request failed before a response arrived.
    #[error("directions request to {url} failed: {message}")]
    NetworkError {
        /// Requested endpoint.
        url: String,
        /// Error description from the client.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("failed to parse directions response: {message}")]
    ParseError {
        /// Decoder error description.
        message: String,
    },
    /// The service reported a status other than `OK`.
    #[error("directions service returned {status}: {message}")]
    Service {
        /// Status string reported by the service.
        status: String,
        /// Accompanying message, if any.
        message: String,
    },
    /// A route's encoded geometry could not be decoded.
    #[error("route {index} has an invalid polyline")]
    Polyline {
        /// Position of the route in the response.
        index: usize,
        /// Decoder failure.
        #[source]
        source: PolylineError,
    },
    /// A route decoded to an unusable path.
    #[error("route {index} has an invalid path")]
    InvalidPath {
        /// Position of the route in the response.
        index: usize,
        /// Validation failure.
        #[source]
        source: RoutePathError,
    },
}

/// A validated origin/destination pair.
///
/// Endpoints are free text (addresses or `"lat,lng"` strings) passed through
/// to the provider untouched, apart from trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionsRequest {
    origin: String,
    destination: String,
    alternatives: bool,
}

impl DirectionsRequest {
    /// Build a request asking for alternative routes.
    ///
    /// # Errors
    /// Returns [`DirectionsError::MissingEndpoint`] when either endpoint is
    /// empty or whitespace.
    ///
    /// # Examples
    /// ```
    /// use saferoute_core::{DirectionsError, DirectionsRequest, Endpoint};
    ///
    /// let request = DirectionsRequest::new(" Charminar ", "Hitech City")?;
    /// assert_eq!(request.origin(), "Charminar");
    ///
    /// let err = DirectionsRequest::new("Charminar", "  ").unwrap_err();
    /// assert_eq!(err, DirectionsError::MissingEndpoint(Endpoint::Destination));
    /// # Ok::<(), DirectionsError>(())
    /// ```
    pub fn new(
        origin: impl AsRef<str>,
        destination: impl AsRef<str>,
    ) -> Result<Self, DirectionsError> {
        let origin = origin.as_ref().trim();
        let destination = destination.as_ref().trim();
        if origin.is_empty() {
            return Err(DirectionsError::MissingEndpoint(Endpoint::Origin));
        }
        if destination.is_empty() {
            return Err(DirectionsError::MissingEndpoint(Endpoint::Destination));
        }
        Ok(Self {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
            alternatives: true,
        })
    }

    /// Ask for the single best route only.
    #[must_use]
    pub fn without_alternatives(mut self) -> Self {
        self.alternatives = false;
        self
    }

    /// Trip start.
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Trip end.
    #[must_use]
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Whether alternative routes are requested.
    #[must_use]
    pub const fn alternatives(&self) -> bool {
        self.alternatives
    }
}

/// Fetch candidate routes between two endpoints.
///
/// Routes are returned in the provider's order with `index` set to their
/// position.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Fetch routes for `request`.
    async fn routes(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, DirectionsError>;
}

#[async_trait]
impl<T: DirectionsProvider + ?Sized> DirectionsProvider for Box<T> {
    async fn routes(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, DirectionsError> {
        (**self).routes(request).await
    }
}

#[async_trait]
impl<T: DirectionsProvider + ?Sized> DirectionsProvider for std::sync::Arc<T> {
    async fn routes(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, DirectionsError> {
        (**self).routes(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "B", Endpoint::Origin)]
    #[case("   ", "", Endpoint::Origin)]
    #[case("A", "\t", Endpoint::Destination)]
    fn blank_endpoints_are_rejected(
        #[case] origin: &str,
        #[case] destination: &str,
        #[case] missing: Endpoint,
    ) {
        assert_eq!(
            DirectionsRequest::new(origin, destination),
            Err(DirectionsError::MissingEndpoint(missing))
        );
    }

    #[rstest]
    fn alternatives_default_on() {
        let request = DirectionsRequest::new("A", "B").expect("valid request");
        assert!(request.alternatives());
        assert!(!request.without_alternatives().alternatives());
    }

    #[rstest]
    fn missing_endpoint_message_names_the_end() {
        let err = DirectionsError::MissingEndpoint(Endpoint::Destination);
        assert_eq!(err.to_string(), "destination is required");
    }
}
