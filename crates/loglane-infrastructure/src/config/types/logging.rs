//! Logging configuration types

use crate::constants::*;
use crate::encoding::{EncoderLabels, LogFormat};
use crate::sink::ConsoleTarget;
use loglane_domain::error::{Error, Result};
use loglane_domain::{Level, RotationPolicy};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory a relative `file_name` is resolved against
    pub root_path: PathBuf,

    /// Log file name (or absolute path)
    pub file_name: PathBuf,

    /// Minimum severity (debug, info, warn, error, fatal, panic)
    pub level: String,

    /// Logger name stamped on every record
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Line format
    pub format: LogFormat,

    /// Annotate records with the calling file and line
    pub caller: bool,

    /// Attach a stack trace at and above this severity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stacktrace_level: Option<String>,

    /// Also write every record to this stream
    #[serde(skip_serializing_if = "Option::is_none")]
    pub console: Option<ConsoleTarget>,

    /// Deliver through a bounded queue instead of blocking the caller
    pub non_blocking: bool,

    /// Queue capacity in records when `non_blocking` is set
    pub buffered_lines_limit: usize,

    /// File rotation, compression and retention
    pub rotation: RotationPolicy,

    /// Record field labels
    pub labels: EncoderLabels,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from(DEFAULT_ROOT_PATH),
            file_name: PathBuf::from(DEFAULT_LOG_FILE),
            level: DEFAULT_LOG_LEVEL.to_string(),
            name: None,
            format: LogFormat::default(),
            caller: true,
            stacktrace_level: None,
            console: None,
            non_blocking: false,
            buffered_lines_limit: DEFAULT_BUFFERED_LINES_LIMIT,
            rotation: RotationPolicy::default(),
            labels: EncoderLabels::default(),
        }
    }
}

impl LogConfig {
    /// The active log file: `file_name` joined onto `root_path` unless absolute
    pub fn log_file_path(&self) -> PathBuf {
        if self.file_name.is_absolute() {
            self.file_name.clone()
        } else {
            self.root_path.join(&self.file_name)
        }
    }

    /// The threshold `level` maps to; unrecognized strings fall back to `info`
    pub fn resolved_level(&self) -> Level {
        Level::parse_or_fallback(&self.level)
    }

    pub fn stacktrace_level(&self) -> Option<Level> {
        self.stacktrace_level
            .as_deref()
            .map(Level::parse_or_fallback)
    }

    /// Reject configurations no logger can be built from
    pub fn validate(&self) -> Result<()> {
        if self.file_name.as_os_str().is_empty() {
            return Err(Error::configuration("Log file name cannot be empty"));
        }
        if self.non_blocking && self.buffered_lines_limit == 0 {
            return Err(Error::configuration(
                "Buffered lines limit cannot be 0 when non-blocking delivery is enabled",
            ));
        }
        self.rotation.validate()?;
        self.labels.validate()?;
        Ok(())
    }
}
