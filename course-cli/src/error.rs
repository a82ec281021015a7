//! Error types emitted by the course CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use course_core::{InvalidInputError, OptimizeError};
use thiserror::Error;

/// Errors emitted by the course CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set the {field} argument or {env})")]
    MissingArgument {
        /// Argument name.
        field: &'static str,
        /// Environment variable that can supply the value.
        env: &'static str,
    },
    /// The request path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The request path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// The request path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Argument name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The merged optimiser settings are out of range.
    #[error("invalid optimizer settings: {0}")]
    InvalidSettings(#[source] InvalidInputError),
    /// The log level is not one of `off`, `error`, `warn`, `info`, `debug`
    /// or `trace`.
    #[error("unknown log level {value:?}")]
    InvalidLogLevel {
        /// Rejected value.
        value: String,
    },
    /// A logger was already installed for this process.
    #[error("failed to initialise logging: {0}")]
    Logging(#[source] std::io::Error),
    /// Opening the course request file failed.
    #[error("failed to open course request at {path:?}: {source}")]
    OpenRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Course request JSON could not be decoded.
    #[error("failed to parse course request JSON at {path:?}: {source}")]
    ParseRequest {
        /// Request path.
        path: Utf8PathBuf,
        /// Decoder failure.
        #[source]
        source: serde_json::Error,
    },
    /// The optimiser rejected the request.
    #[error("course request in {path:?} was rejected: {source}")]
    Optimize {
        /// Request path.
        path: Utf8PathBuf,
        /// Optimiser failure.
        #[source]
        source: OptimizeError,
    },
    /// Serialising the recommendation failed.
    #[error("failed to serialise course recommendation: {0}")]
    SerialiseRecommendation(#[source] serde_json::Error),
    /// Writing the recommendation failed.
    #[error("failed to write course recommendation: {0}")]
    WriteOutput(#[source] std::io::Error),
}
