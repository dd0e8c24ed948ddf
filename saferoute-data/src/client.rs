//! Shared HTTP client construction for the Google-backed collaborators.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

/// Default user agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "saferoute/0.1";

/// Default request timeout in seconds.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error returned when an HTTP collaborator cannot be constructed.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Build a client whose connect and total timeouts both equal `timeout`.
pub(crate) fn build_client(
    user_agent: &str,
    timeout: Duration,
) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// The parts of a `reqwest::Error` both collaborators map into their own
/// error types.
pub(crate) enum Failure {
    Timeout,
    Status(u16),
    Network,
}

impl Failure {
    pub(crate) fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network
        }
    }
}
