//! Command-line interface for the saferoute engine.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use std::io::Write;

mod analyze;
mod emergency;
mod error;
mod files;
mod plan;
mod services;

pub use error::CliError;

use analyze::{AnalyzeArgs, run_analyze_with};
use emergency::{EmergencyArgs, run_emergency_with};
use plan::{PlanArgs, run_plan_with};
use services::{Collaborators, HttpCollaborators};

pub(crate) const ARG_ROUTES: &str = "routes";
pub(crate) const ARG_ORIGIN: &str = "origin";
pub(crate) const ARG_DESTINATION: &str = "destination";
pub(crate) const ARG_LAT: &str = "lat";
pub(crate) const ARG_LNG: &str = "lng";
pub(crate) const ARG_PLACES_BASE_URL: &str = "places-base-url";
pub(crate) const ARG_DIRECTIONS_BASE_URL: &str = "directions-base-url";
pub(crate) const ARG_API_KEY: &str = "api-key";
pub(crate) const ARG_SEED: &str = "seed";
pub(crate) const ARG_AT: &str = "at";
pub(crate) const ENV_ROUTES: &str = "SAFEROUTE_CMDS_ANALYZE_ROUTES_PATH";
pub(crate) const ENV_ORIGIN: &str = "SAFEROUTE_CMDS_PLAN_ORIGIN";
pub(crate) const ENV_DESTINATION: &str = "SAFEROUTE_CMDS_PLAN_DESTINATION";
pub(crate) const ENV_LAT: &str = "SAFEROUTE_CMDS_EMERGENCY_LAT";
pub(crate) const ENV_LNG: &str = "SAFEROUTE_CMDS_EMERGENCY_LNG";
pub(crate) const ENV_API_KEY: &str = "SAFEROUTE_API_KEY";

/// Run the saferoute CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments or configuration are invalid, an
/// input cannot be read, a collaborator fails, or output cannot be written.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let mut stdout = std::io::stdout().lock();
    runtime.block_on(dispatch(cli.command, &HttpCollaborators, &mut stdout))
}

async fn dispatch(
    command: Command,
    collaborators: &dyn Collaborators,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Analyze(args) => run_analyze_with(args, collaborators, writer).await,
        Command::Plan(args) => run_plan_with(args, collaborators, writer).await,
        Command::Emergency(args) => run_emergency_with(args, collaborators, writer).await,
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "saferoute",
    about = "Rank routes by safety and find emergency help nearby",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score candidate routes read from a JSON file.
    Analyze(AnalyzeArgs),
    /// Fetch routes between two places and score them.
    Plan(PlanArgs),
    /// List emergency services near a point.
    Emergency(EmergencyArgs),
}

#[cfg(test)]
mod tests;
