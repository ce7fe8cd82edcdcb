//! Domain layer constants
//!
//! Severity and rotation defaults shared by every layer. Configuration and
//! presentation constants live in `loglane_infrastructure::constants`.

use crate::value_objects::Level;

// ============================================================================
// SEVERITY CONSTANTS
// ============================================================================

/// Level used when a configured level string is not recognized.
///
/// Differs from [`DEFAULT_LEVEL`]: an unset level means `debug`, a misspelled
/// one means `info`.
pub const UNRECOGNIZED_LEVEL_FALLBACK: Level = Level::Info;

/// Level used when nothing is configured
pub const DEFAULT_LEVEL: Level = Level::Debug;

// ============================================================================
// ROTATION CONSTANTS
// ============================================================================

/// Bytes in one megabyte (rotation sizes are configured in bytes)
pub const MEGABYTE: u64 = 1024 * 1024;

/// Maximum size of the active log file before it is rotated
pub const DEFAULT_MAX_SIZE_BYTES: u64 = 500 * MEGABYTE;

/// Number of rotated backups kept on disk (0 keeps all)
pub const DEFAULT_MAX_BACKUPS: usize = 100;

/// Age in days after which a backup is pruned (0 disables age pruning)
pub const DEFAULT_MAX_AGE_DAYS: u64 = 1000;

/// Whether rotated backups are gzip compressed
pub const DEFAULT_COMPRESS: bool = true;

/// Suffix appended to compressed backups
pub const COMPRESSED_SUFFIX: &str = ".gz";

/// Seconds in one day, for age-based pruning
pub const SECONDS_PER_DAY: u64 = 24 * 60 * 60;
