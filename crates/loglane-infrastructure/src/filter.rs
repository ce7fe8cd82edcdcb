//! Severity filter
//!
//! A single threshold shared by every logger handle cloned from the same
//! core. Updates are one atomic store, so readers see either the old or the
//! new level and a change applies to the very next record.

use loglane_domain::Level;
use loglane_domain::constants::DEFAULT_LEVEL;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Shared minimum-level gate
#[derive(Debug, Clone)]
pub struct LevelFilter {
    threshold: Arc<AtomicU8>,
}

impl LevelFilter {
    /// Create a filter passing `level` and above
    pub fn new(level: Level) -> Self {
        Self {
            threshold: Arc::new(AtomicU8::new(level.as_u8())),
        }
    }

    /// Create a filter from a configured level string.
    ///
    /// Unrecognized strings fall back to
    /// [`UNRECOGNIZED_LEVEL_FALLBACK`](loglane_domain::constants::UNRECOGNIZED_LEVEL_FALLBACK).
    pub fn from_config_str(level: &str) -> Self {
        Self::new(Level::parse_or_fallback(level))
    }

    /// True iff `level` is at or above the threshold
    pub fn enabled(&self, level: Level) -> bool {
        level.as_u8() >= self.threshold.load(Ordering::Acquire)
    }

    /// Change the threshold for every handle sharing this filter
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level.as_u8(), Ordering::Release);
    }

    /// Current threshold
    pub fn level(&self) -> Level {
        Level::from_u8(self.threshold.load(Ordering::Acquire)).unwrap_or(DEFAULT_LEVEL)
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}
