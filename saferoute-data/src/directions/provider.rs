//! HTTP-based [`DirectionsProvider`] using the Google Directions API.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use saferoute_core::{CandidateRoute, DirectionsError, DirectionsProvider, DirectionsRequest};

use super::google::DirectionsResponse;
use crate::client::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, Failure, ProviderBuildError, build_client,
};

/// Default Directions API host.
pub const DEFAULT_DIRECTIONS_BASE_URL: &str = "https://maps.googleapis.com";

/// Configuration for [`HttpDirections`].
#[derive(Clone)]
pub struct HttpDirectionsConfig {
    /// Base URL of the Directions service, without a trailing path.
    pub base_url: String,
    /// API key sent as the `key` query parameter.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpDirectionsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectionsConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpDirectionsConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIRECTIONS_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsConfig {
    /// Create a configuration for the service at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }
}

/// Directions provider backed by `maps/api/directions/json`.
///
/// Requests ask for alternatives unless the [`DirectionsRequest`] opts out.
/// Endpoint URLs in errors never include the API key.
#[derive(Debug)]
pub struct HttpDirections {
    client: Client,
    config: HttpDirectionsConfig,
}

impl HttpDirections {
    /// Create a provider for the service at `base_url` with no API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpDirectionsConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpDirectionsConfig {
        &self.config
    }

    fn directions_url(&self) -> String {
        format!(
            "{}/maps/api/directions/json",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// reqwest errors echo the full request URL, key included.
    fn redact(&self, message: &str) -> String {
        if self.config.api_key.is_empty() {
            message.to_owned()
        } else {
            message.replace(&self.config.api_key, "<redacted>")
        }
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DirectionsError {
        let message = self.redact(&error.to_string());
        match Failure::classify(error) {
            Failure::Timeout => DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            },
            Failure::Status(status) => DirectionsError::HttpError {
                url: url.to_owned(),
                status,
                message,
            },
            Failure::Network => DirectionsError::NetworkError {
                url: url.to_owned(),
                message,
            },
        }
    }
}

#[async_trait]
impl DirectionsProvider for HttpDirections {
    async fn routes(
        &self,
        request: &DirectionsRequest,
    ) -> Result<Vec<CandidateRoute>, DirectionsError> {
        let url = self.directions_url();
        let alternatives = if request.alternatives() { "true" } else { "false" };
        debug!(
            "requesting directions from '{}' to '{}'",
            request.origin(),
            request.destination()
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("origin", request.origin()),
                ("destination", request.destination()),
                ("alternatives", alternatives),
                ("key", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::ParseError {
                    message: err.without_url().to_string(),
                })?;

        let routes = body.into_routes()?;
        info!("directions service returned {} routes", routes.len());
        Ok(routes)
    }
}
