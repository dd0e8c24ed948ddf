//! `analyze` command: score candidate routes read from a JSON file.

use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDateTime;
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::{CandidateRoute, RouteAnalyzer};
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};

use crate::files::{file_is_file, open_utf8_file};
use crate::services::{Collaborators, ServiceConfig, analysis_context, write_json};
use crate::{
    ARG_API_KEY, ARG_AT, ARG_PLACES_BASE_URL, ARG_ROUTES, ARG_SEED, CliError, ENV_API_KEY,
    ENV_ROUTES,
};

/// CLI arguments for the `analyze` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score candidate routes loaded from a JSON array of routes \
                 (index, path of {lat, lng} points, optional metadata). \
                 Hospitals and police stations are looked up with the \
                 Places service; the ranked assessments are printed as JSON.",
    about = "Score candidate routes from a JSON file"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct AnalyzeArgs {
    /// Path to a JSON file containing candidate routes.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) routes_path: Option<Utf8PathBuf>,
    /// Base URL for the Places service.
    #[arg(long = ARG_PLACES_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) places_base_url: Option<String>,
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

impl AnalyzeArgs {
    pub(crate) fn into_config(self) -> Result<AnalyzeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnalyzeConfig::try_from(merged)
    }
}

/// Resolved `analyze` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AnalyzeConfig {
    pub(crate) routes_path: Utf8PathBuf,
    pub(crate) services: ServiceConfig,
    pub(crate) seed: Option<u64>,
    pub(crate) at: Option<NaiveDateTime>,
}

impl AnalyzeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        let path = &self.routes_path;
        match file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field: ARG_ROUTES,
                path: path.clone(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field: ARG_ROUTES,
                    path: path.clone(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field: ARG_ROUTES,
                path: path.clone(),
                source,
            }),
        }
    }
}

impl TryFrom<AnalyzeArgs> for AnalyzeConfig {
    type Error = CliError;

    fn try_from(args: AnalyzeArgs) -> Result<Self, Self::Error> {
        let routes_path = args.routes_path.ok_or(CliError::MissingArgument {
            field: ARG_ROUTES,
            env: ENV_ROUTES,
        })?;
        let services = ServiceConfig::resolve(args.places_base_url, None, args.api_key)?;
        Ok(Self {
            routes_path,
            services,
            seed: args.seed,
            at: args.at,
        })
    }
}

pub(crate) async fn run_analyze_with(
    args: AnalyzeArgs,
    collaborators: &dyn Collaborators,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let routes = load_routes(&config.routes_path)?;
    log::info!("loaded {} candidate routes from {}", routes.len(), config.routes_path);

    let analyzer = RouteAnalyzer::new(collaborators.place_search(&config.services)?);
    let context = analysis_context(config.at, config.seed);
    let ranked = analyzer.analyze_all(&routes, &context).await?;
    write_json(writer, &ranked)
}

/// Loads a JSON array of [`CandidateRoute`] values from disk.
pub(crate) fn load_routes(path: &Utf8Path) -> Result<Vec<CandidateRoute>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRoutes {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| CliError::ParseRoutes {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<AnalyzeConfig, CliError> {
    let merged = AnalyzeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    AnalyzeConfig::try_from(merged)
}
