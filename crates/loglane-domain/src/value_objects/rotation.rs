//! Rotation policy for file sinks

use crate::constants::{
    DEFAULT_COMPRESS, DEFAULT_MAX_AGE_DAYS, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SIZE_BYTES,
    SECONDS_PER_DAY,
};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Value Object: Rotation Policy
///
/// Fixed when a sink is built; changing it requires a new sink.
///
/// ## Business Rules
///
/// - The active file never grows past `max_size_bytes`
/// - `max_backups == 0` keeps every backup
/// - `max_age_days == 0` disables age-based pruning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationPolicy {
    /// Maximum size of the active file in bytes
    pub max_size_bytes: u64,
    /// Maximum number of rotated backups to keep
    pub max_backups: usize,
    /// Maximum age of a backup in days
    pub max_age_days: u64,
    /// Gzip rotated backups
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
            max_age_days: DEFAULT_MAX_AGE_DAYS,
            compress: DEFAULT_COMPRESS,
        }
    }
}

impl RotationPolicy {
    /// Maximum backup age, or `None` when age pruning is disabled
    pub fn max_age(&self) -> Option<Duration> {
        (self.max_age_days > 0)
            .then(|| Duration::from_secs(self.max_age_days.saturating_mul(SECONDS_PER_DAY)))
    }

    /// Maximum backup count, or `None` when every backup is kept
    pub fn backup_limit(&self) -> Option<usize> {
        (self.max_backups > 0).then_some(self.max_backups)
    }

    /// Check the policy is usable
    pub fn validate(&self) -> Result<()> {
        if self.max_size_bytes == 0 {
            return Err(Error::configuration(
                "Rotation max_size_bytes must be greater than 0",
            ));
        }
        Ok(())
    }
}
