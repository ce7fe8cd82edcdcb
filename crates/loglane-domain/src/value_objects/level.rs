//! Severity levels

use crate::constants::UNRECOGNIZED_LEVEL_FALLBACK;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Value Object: Log Severity
///
/// Ordered from least to most severe. `Fatal` and `Panic` are severities
/// only; emitting at them never exits or unwinds the process.
///
/// ## Example
///
/// ```rust
/// use loglane_domain::Level;
///
/// assert!(Level::Warn > Level::Info);
/// assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
/// assert_eq!(Level::parse_or_fallback("verbose"), Level::Info);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Debugging information
    Debug = 0,
    /// General information
    Info = 1,
    /// Warning messages
    Warn = 2,
    /// Error messages
    Error = 3,
    /// Errors the application cannot continue from
    Fatal = 4,
    /// Errors that would abort in stricter loggers
    Panic = 5,
}

impl Level {
    /// Every level, least severe first
    pub const ALL: [Level; 6] = [
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Lowercase name used in encoded output
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
            Level::Panic => "panic",
        }
    }

    /// Numeric rank, suitable for atomic storage
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Level::as_u8`]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Parse a configured level, falling back to
    /// [`UNRECOGNIZED_LEVEL_FALLBACK`] for anything unknown.
    pub fn parse_or_fallback(level: &str) -> Self {
        level.parse().unwrap_or(UNRECOGNIZED_LEVEL_FALLBACK)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "fatal" => Ok(Level::Fatal),
            "panic" => Ok(Level::Panic),
            _ => Err(Error::invalid_argument(format!(
                "Invalid log level: {}. Use debug, info, warn, error, fatal, or panic",
                s
            ))),
        }
    }
}
