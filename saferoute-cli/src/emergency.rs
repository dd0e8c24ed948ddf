//! `emergency` command: list help nearby a point.

use std::io::Write;
use std::time::Duration;

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use saferoute_core::{GeoPoint, find_emergency_services};
use serde::{Deserialize, Serialize};

use crate::services::{Collaborators, ServiceConfig, write_json};
use crate::{
    ARG_API_KEY, ARG_LAT, ARG_LNG, ARG_PLACES_BASE_URL, CliError, ENV_API_KEY, ENV_LAT, ENV_LNG,
};

const LOOKUP_TIMEOUT_SECS: u64 = 10;

/// CLI arguments for the `emergency` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Find the nearest hospitals, police stations, fuel stations \
                 and lodging around a point and print them, with general \
                 emergency tips, as JSON.",
    about = "List emergency services near a point"
)]
#[ortho_config(prefix = "SAFEROUTE")]
pub(crate) struct EmergencyArgs {
    /// Latitude in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Longitude in degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Base URL for the Places service.
    #[arg(long = ARG_PLACES_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) places_base_url: Option<String>,
    /// API key for the Google services.
    #[arg(long = ARG_API_KEY, value_name = "key", env = ENV_API_KEY, hide_env_values = true)]
    #[serde(default)]
    pub(crate) api_key: Option<String>,
}

impl EmergencyArgs {
    pub(crate) fn into_config(self) -> Result<EmergencyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        EmergencyConfig::try_from(merged)
    }
}

/// Resolved `emergency` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct EmergencyConfig {
    pub(crate) location: GeoPoint,
    pub(crate) services: ServiceConfig,
}

impl TryFrom<EmergencyArgs> for EmergencyConfig {
    type Error = CliError;

    fn try_from(args: EmergencyArgs) -> Result<Self, Self::Error> {
        let lat = args.lat.ok_or(CliError::MissingArgument {
            field: ARG_LAT,
            env: ENV_LAT,
        })?;
        let lng = args.lng.ok_or(CliError::MissingArgument {
            field: ARG_LNG,
            env: ENV_LNG,
        })?;
        if !(lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0) {
            return Err(CliError::InvalidCoordinate { lat, lng });
        }
        let services = ServiceConfig::resolve(args.places_base_url, None, args.api_key)?;
        Ok(Self {
            location: GeoPoint::new(lat, lng),
            services,
        })
    }
}

pub(crate) async fn run_emergency_with(
    args: EmergencyArgs,
    collaborators: &dyn Collaborators,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let search = collaborators.place_search(&config.services)?;
    let services = find_emergency_services(
        &*search,
        config.location,
        Duration::from_secs(LOOKUP_TIMEOUT_SECS),
    )
    .await;
    write_json(writer, &services)
}
