//! Command-line harness around the course route engine.
//!
//! The `course optimize` subcommand reads a JSON course request from disk,
//! orders and schedules its places, and prints the recommendation as pretty
//! JSON on stdout. Optimiser settings are layered from CLI flags, `COURSE_`
//! environment variables and configuration files.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod fs;
mod logging;
mod optimize;

pub use error::CliError;

use optimize::{OptimizeArgs, run_optimize};

pub(crate) const ARG_REQUEST: &str = "request";
pub(crate) const ARG_WALKING_SPEED: &str = "walking-speed-kmh";
pub(crate) const ARG_TRANSIT_SPEED: &str = "transit-speed-kmh";
pub(crate) const ARG_WALKING_THRESHOLD: &str = "walking-threshold-km";
pub(crate) const ARG_DEFAULT_VISIT: &str = "default-visit-minutes";
pub(crate) const ARG_MAX_RUN: &str = "max-run";
pub(crate) const ARG_DIVERSITY_TOLERANCE: &str = "diversity-tolerance";
pub(crate) const ARG_LOG_LEVEL: &str = "log-level";
pub(crate) const ENV_REQUEST: &str = "COURSE_CMDS_OPTIMIZE_REQUEST_PATH";

/// Run the course CLI with the current process arguments and environment.
///
/// # Errors
/// Returns a [`CliError`] when argument parsing, configuration layering,
/// request loading, optimisation or output fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Optimize(args) => run_optimize(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "course",
    about = "Order and schedule a short course of places",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Optimise a JSON course request and print the recommendation.
    Optimize(OptimizeArgs),
}

#[cfg(test)]
mod tests;
