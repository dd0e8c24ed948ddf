//! Error types emitted by the saferoute CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use saferoute_core::{AnalysisError, DirectionsError};
use saferoute_data::ProviderBuildError;
use thiserror::Error;

/// Errors emitted by the saferoute CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A latitude/longitude pair is outside WGS84 bounds or not finite.
    #[error("coordinate ({lat}, {lng}) is not a valid latitude/longitude pair")]
    InvalidCoordinate { lat: f64, lng: f64 },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the candidate routes file failed.
    #[error("failed to open routes at {path:?}: {source}")]
    OpenRoutes {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Candidate routes JSON could not be decoded.
    #[error("failed to parse routes JSON at {path:?}: {source}")]
    ParseRoutes {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Starting the async runtime failed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Constructing the place-search client failed.
    #[error("failed to build place search client for {base_url:?}: {source}")]
    BuildPlaceSearch {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Constructing the directions client failed.
    #[error("failed to build directions client for {base_url:?}: {source}")]
    BuildDirections {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The directions request was rejected or failed.
    #[error("directions lookup failed: {0}")]
    Directions(#[from] DirectionsError),
    /// The analyzer rejected the candidate routes.
    #[error("route analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
    /// Serializing the command output failed.
    #[error("failed to serialize output: {0}")]
    SerializeOutput(#[source] serde_json::Error),
    /// Writing the command output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
