//! Logger installation for the CLI process.

use std::io::{self, Write};

use env_logger::{Builder, Env, Target, WriteStyle, fmt::Formatter};
use log::{Level, LevelFilter};

use crate::CliError;

/// Parse a `--log-level` value.
pub(crate) fn parse_level(value: &str) -> Result<LevelFilter, CliError> {
    value
        .trim()
        .parse::<LevelFilter>()
        .map_err(|_| CliError::InvalidLogLevel {
            value: value.to_owned(),
        })
}

/// Install the process-wide stderr logger.
///
/// An explicit level wins; otherwise `RUST_LOG` applies, falling back to
/// `warn`.
pub(crate) fn init_logger(level: Option<LevelFilter>) -> Result<(), CliError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .write_style(WriteStyle::Never)
        .target(Target::Stderr)
        .format(|buf: &mut Formatter, record| {
            writeln!(
                buf,
                "{} [{}] {}",
                level_tag(record.level()),
                record.target(),
                record.args()
            )
        });
    builder
        .try_init()
        .map_err(|err| CliError::Logging(io::Error::other(err)))
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
