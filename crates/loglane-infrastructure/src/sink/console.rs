//! Terminal output

use crate::error_ext::ErrorContext;
use loglane_domain::LogSink;
use loglane_domain::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Which standard stream a console sink writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
}

/// Writes records to standard output or standard error
///
/// The stream lock is held for the whole record, so lines from concurrent
/// writers do not interleave.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleSink {
    target: ConsoleTarget,
}

impl ConsoleSink {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    pub fn stdout() -> Self {
        Self::new(ConsoleTarget::Stdout)
    }

    pub fn stderr() -> Self {
        Self::new(ConsoleTarget::Stderr)
    }
}

impl LogSink for ConsoleSink {
    fn write(&self, buf: &[u8]) -> Result<()> {
        let result = match self.target {
            ConsoleTarget::Stdout => std::io::stdout().lock().write_all(buf),
            ConsoleTarget::Stderr => std::io::stderr().lock().write_all(buf),
        };
        result.io_context("Failed to write to console")
    }

    fn flush(&self) -> Result<()> {
        let result = match self.target {
            ConsoleTarget::Stdout => std::io::stdout().flush(),
            ConsoleTarget::Stderr => std::io::stderr().flush(),
        };
        result.io_context("Failed to flush console")
    }

    fn close(&self) -> Result<()> {
        self.flush()
    }
}
