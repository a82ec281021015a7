//! `optimize` command implementation.

use std::io::{BufReader, Write};

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use course_core::{CourseRecommendation, CourseRequest, OptimizerConfig};
use course_solver::optimize_course;
use log::{LevelFilter, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::fs::{file_is_file, open_utf8_file};
use crate::logging::{init_logger, parse_level};
use crate::{
    ARG_DEFAULT_VISIT, ARG_DIVERSITY_TOLERANCE, ARG_LOG_LEVEL, ARG_MAX_RUN, ARG_REQUEST,
    ARG_TRANSIT_SPEED, ARG_WALKING_SPEED, ARG_WALKING_THRESHOLD, CliError, ENV_REQUEST,
};

/// CLI arguments for the `optimize` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Order three to six places into a short walking course. \
                 The request is a JSON-encoded CourseRequest; optimiser \
                 settings can come from CLI flags, configuration files, or \
                 environment variables.",
    about = "Optimise a course request"
)]
#[ortho_config(prefix = "COURSE")]
pub(crate) struct OptimizeArgs {
    /// Path to a JSON file containing a CourseRequest.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) request_path: Option<Utf8PathBuf>,
    /// Walking speed for short legs.
    #[arg(long = ARG_WALKING_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) walking_speed_kmh: Option<f64>,
    /// Transit speed for legs beyond the walking threshold.
    #[arg(long = ARG_TRANSIT_SPEED, value_name = "km/h")]
    #[serde(default)]
    pub(crate) transit_speed_kmh: Option<f64>,
    /// Longest leg that is still walked.
    #[arg(long = ARG_WALKING_THRESHOLD, value_name = "km")]
    #[serde(default)]
    pub(crate) walking_threshold_km: Option<f64>,
    /// Visit duration for places without an estimate.
    #[arg(long = ARG_DEFAULT_VISIT, value_name = "minutes")]
    #[serde(default)]
    pub(crate) default_visit_minutes: Option<u32>,
    /// Longest accepted run of same-category stops.
    #[arg(long = ARG_MAX_RUN, value_name = "stops")]
    #[serde(default)]
    pub(crate) max_run: Option<usize>,
    /// Largest distance increase per diversity swap, as a fraction of the
    /// total.
    #[arg(long = ARG_DIVERSITY_TOLERANCE, value_name = "fraction")]
    #[serde(default)]
    pub(crate) diversity_tolerance: Option<f64>,
    /// Log verbosity (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    #[arg(long = ARG_LOG_LEVEL, value_name = "level")]
    #[serde(default)]
    pub(crate) log_level: Option<String>,
}

impl OptimizeArgs {
    pub(crate) fn into_config(self) -> Result<OptimizeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        OptimizeConfig::try_from(merged)
    }
}

/// Resolved `optimize` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct OptimizeConfig {
    /// Path to the JSON request file.
    pub(crate) request_path: Utf8PathBuf,
    /// Validated optimiser settings.
    pub(crate) optimizer: OptimizerConfig,
    /// Explicit log level, if one was configured.
    pub(crate) log_level: Option<LevelFilter>,
}

impl OptimizeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.request_path, ARG_REQUEST)
    }
}

fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

impl TryFrom<OptimizeArgs> for OptimizeConfig {
    type Error = CliError;

    fn try_from(args: OptimizeArgs) -> Result<Self, Self::Error> {
        let request_path = args.request_path.ok_or(CliError::MissingArgument {
            field: ARG_REQUEST,
            env: ENV_REQUEST,
        })?;

        let mut optimizer = OptimizerConfig::default();
        let speed = &mut optimizer.speed;
        speed.walking_speed_kmh = args.walking_speed_kmh.unwrap_or(speed.walking_speed_kmh);
        speed.transit_speed_kmh = args.transit_speed_kmh.unwrap_or(speed.transit_speed_kmh);
        speed.walking_threshold_km = args
            .walking_threshold_km
            .unwrap_or(speed.walking_threshold_km);
        optimizer.default_visit_minutes = args
            .default_visit_minutes
            .unwrap_or(optimizer.default_visit_minutes);
        optimizer.diversity.max_run = args.max_run.unwrap_or(optimizer.diversity.max_run);
        optimizer.diversity.distance_tolerance = args
            .diversity_tolerance
            .unwrap_or(optimizer.diversity.distance_tolerance);
        optimizer.validate().map_err(CliError::InvalidSettings)?;

        let log_level = args.log_level.as_deref().map(parse_level).transpose()?;

        Ok(Self {
            request_path,
            optimizer,
            log_level,
        })
    }
}

/// Installs the process logger once the log level is known.
pub(crate) type LoggerInit = fn(Option<LevelFilter>) -> Result<(), CliError>;

pub(crate) fn run_optimize(args: OptimizeArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_optimize_with(args, init_logger, &mut stdout)
}

pub(crate) fn run_optimize_with(
    args: OptimizeArgs,
    install_logger: LoggerInit,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = resolve_optimize_config(args)?;
    install_logger(config.log_level)?;
    let course = execute_optimize(&config)?;
    write_recommendation(writer, &course)
}

fn resolve_optimize_config(args: OptimizeArgs) -> Result<OptimizeConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

fn execute_optimize(config: &OptimizeConfig) -> Result<CourseRecommendation, CliError> {
    let request = load_course_request(&config.request_path)?;
    let course = optimize_course(&request, &config.optimizer).map_err(|source| {
        CliError::Optimize {
            path: config.request_path.clone(),
            source,
        }
    })?;
    info!(
        "optimised {} places: {:.3} km, score {:.3}",
        course.stops.len(),
        course.total_distance_km,
        course.optimization_score
    );
    Ok(course)
}

/// Loads a JSON-encoded [`CourseRequest`] from disk.
pub(crate) fn load_course_request(path: &Utf8Path) -> Result<CourseRequest, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenRequest {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| CliError::ParseRequest {
        path: path.to_path_buf(),
        source,
    })
}

fn write_recommendation(
    writer: &mut dyn Write,
    course: &CourseRecommendation,
) -> Result<(), CliError> {
    let payload =
        serde_json::to_string_pretty(course).map_err(CliError::SerialiseRecommendation)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<OptimizeConfig, CliError> {
    let merged = OptimizeArgs::merge_from_layers(layers).map_err(CliError::from)?;
    OptimizeConfig::try_from(merged)
}
