//! Collaborator construction and output helpers shared by the subcommands.

use std::io::Write;

use chrono::{Local, NaiveDateTime};
use saferoute_core::{AnalysisContext, DirectionsProvider, PlaceSearch};
use saferoute_data::{
    HttpDirections, HttpDirectionsConfig, HttpPlaceSearch, HttpPlaceSearchConfig,
};
use serde::Serialize;

use crate::{ARG_API_KEY, CliError, ENV_API_KEY};

/// Endpoints and credentials for the external services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceConfig {
    /// Base URL of the Places service.
    pub(crate) places_base_url: String,
    /// Base URL of the Directions service.
    pub(crate) directions_base_url: String,
    /// API key sent to both services.
    pub(crate) api_key: String,
}

impl ServiceConfig {
    /// Fill unset URLs with the Google defaults and require an API key.
    pub(crate) fn resolve(
        places_base_url: Option<String>,
        directions_base_url: Option<String>,
        api_key: Option<String>,
    ) -> Result<Self, CliError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingArgument {
                field: ARG_API_KEY,
                env: ENV_API_KEY,
            })?;
        Ok(Self {
            places_base_url: places_base_url
                .unwrap_or_else(|| HttpPlaceSearchConfig::default().base_url),
            directions_base_url: directions_base_url
                .unwrap_or_else(|| HttpDirectionsConfig::default().base_url),
            api_key,
        })
    }
}

/// Builds the external collaborators for one invocation.
pub(crate) trait Collaborators {
    fn place_search(&self, config: &ServiceConfig) -> Result<Box<dyn PlaceSearch>, CliError>;

    fn directions(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn DirectionsProvider>, CliError>;
}

/// Google-backed collaborators from `saferoute-data`.
pub(crate) struct HttpCollaborators;

impl Collaborators for HttpCollaborators {
    fn place_search(&self, config: &ServiceConfig) -> Result<Box<dyn PlaceSearch>, CliError> {
        let http = HttpPlaceSearchConfig::new(config.places_base_url.clone())
            .with_api_key(config.api_key.clone());
        let search = HttpPlaceSearch::with_config(http).map_err(|source| {
            CliError::BuildPlaceSearch {
                base_url: config.places_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(search))
    }

    fn directions(
        &self,
        config: &ServiceConfig,
    ) -> Result<Box<dyn DirectionsProvider>, CliError> {
        let http = HttpDirectionsConfig::new(config.directions_base_url.clone())
            .with_api_key(config.api_key.clone());
        let directions = HttpDirections::with_config(http).map_err(|source| {
            CliError::BuildDirections {
                base_url: config.directions_base_url.clone(),
                source,
            }
        })?;
        Ok(Box::new(directions))
    }
}

/// Build the analysis context, defaulting to the local clock and a
/// clock-derived seed.
pub(crate) fn analysis_context(at: Option<NaiveDateTime>, seed: Option<u64>) -> AnalysisContext {
    let now = Local::now();
    let seed = seed.unwrap_or_else(|| u64::try_from(now.timestamp_millis()).unwrap_or_default());
    log::debug!("analysis seed {seed}");
    AnalysisContext::new(at.unwrap_or_else(|| now.naive_local()), seed)
}

/// Write `value` as pretty JSON followed by a newline.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    writer: &mut dyn Write,
    value: &T,
) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(value).map_err(CliError::SerializeOutput)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
