//! Process-wide logger
//!
//! One [`Logger`] per process, installed once with [`init`] or [`install`].
//! When nothing was installed, the first call builds one from
//! [`LogConfig::default()`] (`./output.log`, threshold `debug`).
//!
//! The free functions are thin forwards to that logger; code that can carry a
//! `Logger` around should prefer doing so.

use loglane_domain::{Error, Field, Level, Result, Value};
use loglane_infrastructure::{Diagnostics, LogConfig, Logger};
use std::sync::OnceLock;

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Build the process-wide logger from `config`.
///
/// Fails if a logger is already in place, including the lazily created
/// default one.
pub fn init(config: &LogConfig) -> Result<&'static Logger> {
    install(Logger::from_config(config)?)
}

/// Make `logger` the process-wide logger
pub fn install(logger: Logger) -> Result<&'static Logger> {
    let mut installed = false;
    let global = GLOBAL.get_or_init(|| {
        installed = true;
        logger
    });
    if installed {
        Ok(global)
    } else {
        Err(Error::invalid_argument(
            "Global logger is already initialized",
        ))
    }
}

/// The process-wide logger, created from defaults on first use
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| {
        Logger::from_config(&LogConfig::default()).unwrap_or_else(|err| {
            Diagnostics::stderr().report("failed to create default logger, records are discarded", &err);
            Logger::discard()
        })
    })
}

/// Whether [`init`], [`install`] or a first log call already set the logger
pub fn is_initialized() -> bool {
    GLOBAL.get().is_some()
}

#[track_caller]
pub fn debug<I: IntoIterator<Item = Field>>(message: &str, fields: I) {
    global().debug(message, fields);
}

#[track_caller]
pub fn info<I: IntoIterator<Item = Field>>(message: &str, fields: I) {
    global().info(message, fields);
}

#[track_caller]
pub fn warn<I: IntoIterator<Item = Field>>(message: &str, fields: I) {
    global().warn(message, fields);
}

#[track_caller]
pub fn error<I: IntoIterator<Item = Field>>(message: &str, fields: I) {
    global().error(message, fields);
}

#[track_caller]
pub fn log<I: IntoIterator<Item = Field>>(level: Level, message: &str, fields: I) {
    global().log(level, message, fields);
}

/// Emit with an alternating `key, value, ...` context list
#[track_caller]
pub fn log_pairs<I: IntoIterator<Item = Value>>(level: Level, message: &str, values: I) {
    global().log_pairs(level, message, values);
}

/// A handle on the process-wide logger carrying extra context
pub fn with<I: IntoIterator<Item = Field>>(fields: I) -> Logger {
    global().with(fields)
}

/// A named handle on the process-wide logger
pub fn named(name: &str) -> Logger {
    global().named(name)
}

pub fn set_level(level: Level) {
    global().set_level(level);
}

pub fn flush() -> Result<()> {
    global().flush()
}

/// Flush and close the process-wide sink; call before exiting
pub fn shutdown() -> Result<()> {
    match GLOBAL.get() {
        Some(logger) => logger.shutdown(),
        None => Ok(()),
    }
}
