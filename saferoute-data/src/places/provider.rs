//! HTTP-based [`PlaceSearch`] using Google Places (New).

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use saferoute_core::{PlaceQuery, PlaceRecord, PlaceSearch, PlaceSearchError};

use super::google::{FIELD_MASK, SearchNearbyRequest, SearchNearbyResponse};
use crate::client::{
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, Failure, ProviderBuildError, build_client,
};

/// Default Places API host.
pub const DEFAULT_PLACES_BASE_URL: &str = "https://places.googleapis.com";

/// Configuration for [`HttpPlaceSearch`].
#[derive(Clone)]
pub struct HttpPlaceSearchConfig {
    /// Base URL of the Places service, without a trailing path.
    pub base_url: String,
    /// API key sent in the `X-Goog-Api-Key` header.
    pub api_key: String,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl std::fmt::Debug for HttpPlaceSearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPlaceSearchConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpPlaceSearchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PLACES_BASE_URL.to_owned(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpPlaceSearchConfig {
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

/// Place search backed by the `places:searchNearby` endpoint.
///
/// # Example
///
/// ```no_run
/// use saferoute_core::{AmenityCategory, GeoPoint, PlaceQuery, PlaceSearch};
/// use saferoute_data::places::{HttpPlaceSearch, HttpPlaceSearchConfig};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HttpPlaceSearchConfig::default().with_api_key("my-key");
/// let search = HttpPlaceSearch::with_config(config)?;
/// let centre = GeoPoint::new(17.385, 78.4867);
/// let query = PlaceQuery::new(centre, 3_000.0, AmenityCategory::Hospital, 10);
/// let places = search.search_nearby(&query).await?;
/// # let _ = places;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HttpPlaceSearch {
    client: Client,
    config: HttpPlaceSearchConfig,
}

impl HttpPlaceSearch {
    /// Create a provider for the service at `base_url` with no API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpPlaceSearchConfig::new(base_url))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpPlaceSearchConfig) -> Result<Self, ProviderBuildError> {
        let client = build_client(&config.user_agent, config.timeout)?;
        Ok(Self { client, config })
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &HttpPlaceSearchConfig {
        &self.config
    }

    fn search_url(&self) -> String {
        format!(
            "{}/v1/places:searchNearby",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> PlaceSearchError {
        match Failure::classify(error) {
            Failure::Timeout => PlaceSearchError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            },
            Failure::Status(status) => PlaceSearchError::HttpError {
                url: url.to_owned(),
                status,
                message: error.to_string(),
            },
            Failure::Network => PlaceSearchError::NetworkError {
                url: url.to_owned(),
                message: error.to_string(),
            },
        }
    }
}

#[async_trait]
impl PlaceSearch for HttpPlaceSearch {
    async fn search_nearby(
        &self,
        query: &PlaceQuery,
    ) -> Result<Vec<PlaceRecord>, PlaceSearchError> {
        query.validate()?;
        let url = self.search_url();

        let response = self
            .client
            .post(&url)
            .header("X-Goog-Api-Key", &self.config.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&SearchNearbyRequest::from_query(query))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;

        let body: SearchNearbyResponse =
            response
                .json()
                .await
                .map_err(|err| PlaceSearchError::ParseError {
                    message: err.to_string(),
                })?;

        let mut records = body.into_records(query.category);
        records.truncate(query.max_results);
        debug!(
            "{} search near ({:.5}, {:.5}) returned {} places",
            query.category,
            query.center.lat,
            query.center.lng,
            records.len()
        );
        Ok(records)
    }
}
