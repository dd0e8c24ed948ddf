//! `plan` command: fetch routes between two places, then score them.

use chrono::NaiveDateTime;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::{DirectionsRequest, RouteAnalyzer};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::services::{Collaborators, ServiceConfig, analysis_context, write_json};
use crate::{
    ARG_API_KEY, ARG_AT, ARG_DESTINATION, ARG_DIRECTIONS_BASE_URL, ARG_ORIGIN,
    ARG_PLACES_BASE_URL, ARG_SEED, CliError, ENV_API_KEY, ENV_DESTINATION, ENV_ORIGIN,
};

/// CLI arguments for the `plan` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Ask the Directions service for alternative routes between \
                 an origin and a destination (addresses or \"lat,lng\"), \
                 score each route and print them safest first as JSON.",
    about = "Plan and rank routes between two places"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct PlanArgs {
    /// Where the trip starts.
    #[arg(long = ARG_ORIGIN, value_name = "place")]
    #[serde(default)]
    pub(crate) origin: Option<String>,
    /// Where the trip ends.
    #[arg(long = ARG_DESTINATION, value_name = "place")]
    #[serde(default)]
    pub(crate) destination: Option<String>,
    /// Base URL for the Places service.
    #[arg(long = ARG_PLACES_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) places_base_url: Option<String>,
    /// Base URL for the Directions service.
    #[arg(long = ARG_DIRECTIONS_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) directions_base_url: Option<String>,
    /// API key for the Google services.
    #[arg(long = ARG_API_KEY, value_name = "key", env = ENV_API_KEY, hide_env_values = true)]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
    /// Seed for incident synthesis and lighting variation.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
    /// Local time to assess at, e.g. "2024-07-01T21:30:00".
    #[arg(long = ARG_AT, value_name = "datetime")]
    #[serde(default)]
    pub(crate) at: Option<NaiveDateTime>,
}

impl PlanArgs {
    pub(crate) fn into_config(self) -> Result<PlanConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        PlanConfig::try_from(merged)
    }
}

/// Resolved `plan` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlanConfig {
    pub(crate) request: DirectionsRequest,
    pub(crate) services: ServiceConfig,
    pub(crate) seed: Option<u64>,
    pub(crate) at: Option<NaiveDateTime>,
}

impl TryFrom<PlanArgs> for PlanConfig {
    type Error = CliError;

    fn try_from(args: PlanArgs) -> Result<Self, Self::Error> {
        let origin = args.origin.ok_or(CliError::MissingArgument {
            field: ARG_ORIGIN,
            env: ENV_ORIGIN,
        })?;
        let destination = args.destination.ok_or(CliError::MissingArgument {
            field: ARG_DESTINATION,
            env: ENV_DESTINATION,
        })?;
        let request = DirectionsRequest::new(origin, destination)?;
        let services =
            ServiceConfig::resolve(args.places_base_url, args.directions_base_url, args.api_key)?;
        Ok(Self {
            request,
            services,
            seed: args.seed,
            at: args.at,
        })
    }
}

pub(crate) async fn run_plan_with(
    args: PlanArgs,
    collaborators: &dyn Collaborators,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let directions = collaborators.directions(&config.services)?;
    let routes = directions.routes(&config.request).await?;
    log::info!(
        "found {} routes from '{}' to '{}'",
        routes.len(),
        config.request.origin(),
        config.request.destination()
    );

    let analyzer = RouteAnalyzer::new(collaborators.place_search(&config.services)?);
    let context = analysis_context(config.at, config.seed);
    let ranked = analyzer.analyze_all(&routes, &context).await?;
    write_json(writer, &ranked)
}
