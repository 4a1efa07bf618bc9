//! Logger initialisation shared by the collector and compiler binaries.
//!
//! Library code only speaks to the `log` facade. The binaries call
//! [`init_logging`] once at start-up to route records to stderr through a
//! `fern` dispatcher, using the level named by [`LOG_LEVEL_ENV`].

use std::str::FromStr;

use fern::Dispatch;
use log::LevelFilter;
use thiserror::Error;

/// Environment variable selecting the log level (`info` when unset).
pub const LOG_LEVEL_ENV: &str = "CALENDAR_LOCALES_LOG";

/// Level used when [`LOG_LEVEL_ENV`] is unset or blank.
pub const DEFAULT_LEVEL: LevelFilter = LevelFilter::Info;

/// Errors raised while configuring the logger.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The requested level is not one of `off`, `error`, `warn`, `info`,
    /// `debug`, or `trace`.
    #[error("invalid CALENDAR_LOCALES_LOG value `{value}`")]
    InvalidLevel {
        /// The rejected value.
        value: String,
    },

    /// A global logger was already installed.
    #[error("logger already initialised")]
    AlreadyInitialised(#[from] log::SetLoggerError),
}

/// Parse a level override, falling back to [`DEFAULT_LEVEL`] for blank or
/// missing values.
///
/// ```
/// use calendar_locales_common::logging::{DEFAULT_LEVEL, parse_level};
/// use log::LevelFilter;
///
/// assert_eq!(parse_level(None).ok(), Some(DEFAULT_LEVEL));
/// assert_eq!(parse_level(Some("debug")).ok(), Some(LevelFilter::Debug));
/// assert!(parse_level(Some("loud")).is_err());
/// ```
///
/// # Errors
///
/// Returns [`LoggingError::InvalidLevel`] for unrecognised names.
pub fn parse_level(value: Option<&str>) -> Result<LevelFilter, LoggingError> {
    value
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .map_or(Ok(DEFAULT_LEVEL), |candidate| {
            LevelFilter::from_str(candidate).map_err(|_| LoggingError::InvalidLevel {
                value: candidate.to_owned(),
            })
        })
}

/// Install a stderr logger at the level named by [`LOG_LEVEL_ENV`].
///
/// # Errors
///
/// Returns an error when the environment names an unknown level or a logger
/// is already installed.
pub fn init_logging() -> Result<(), LoggingError> {
    let requested = std::env::var(LOG_LEVEL_ENV).ok();
    let level = parse_level(requested.as_deref())?;
    dispatch(level).apply()?;
    Ok(())
}

fn dispatch(level: LevelFilter) -> Dispatch {
    let verbose = level >= LevelFilter::Debug;
    Dispatch::new()
        .format(move |out, message, record| {
            if verbose {
                out.finish(format_args!(
                    "{}: ({}) {}",
                    record.level(),
                    record.target(),
                    message
                ));
            } else {
                out.finish(format_args!("{}: {}", record.level(), message));
            }
        })
        .level(level)
        .chain(std::io::stderr())
}
