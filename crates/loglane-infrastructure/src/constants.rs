//! Infrastructure layer constants
//!
//! Configuration defaults and output format constants. Severity and
//! rotation defaults live in `loglane_domain::constants`.

use std::time::Duration;

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration filename
pub const DEFAULT_CONFIG_FILENAME: &str = "loglane.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "loglane";

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "LOGLANE";

/// Separator between the prefix and nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOG FILE CONSTANTS
// ============================================================================

/// Directory relative log file names are resolved against
pub const DEFAULT_ROOT_PATH: &str = "./";

/// Default log file name
pub const DEFAULT_LOG_FILE: &str = "output.log";

/// Default minimum level string
pub const DEFAULT_LOG_LEVEL: &str = "debug";

// ============================================================================
// ENCODER CONSTANTS
// ============================================================================

/// Timestamp format: ISO-8601 with milliseconds and numeric offset
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Default label for the timestamp
pub const DEFAULT_TIME_LABEL: &str = "_time";

/// Default label for the level
pub const DEFAULT_LEVEL_LABEL: &str = "_level";

/// Default label for the logger name
pub const DEFAULT_NAME_LABEL: &str = "_logger";

/// Default label for the caller location
pub const DEFAULT_CALLER_LABEL: &str = "_caller";

/// Default label for the message
pub const DEFAULT_MESSAGE_LABEL: &str = "_message";

/// Default label for the stack trace
pub const DEFAULT_STACKTRACE_LABEL: &str = "_stacktrace";

/// Prefix given to context keys that collide with a record label
pub const COLLIDING_FIELD_PREFIX: &str = "fields.";

// ============================================================================
// DELIVERY CONSTANTS
// ============================================================================

/// Queue capacity (in records) of the non-blocking sink
pub const DEFAULT_BUFFERED_LINES_LIMIT: usize = 128_000;

/// Worker thread name of the non-blocking sink
pub const NON_BLOCKING_THREAD_NAME: &str = "loglane-writer";

/// Minimum spacing between two self-diagnostic lines
pub const DIAGNOSTIC_INTERVAL: Duration = Duration::from_secs(1);

/// Prefix of every self-diagnostic line
pub const DIAGNOSTIC_PREFIX: &str = "loglane";

// ============================================================================
// TRACING BRIDGE CONSTANTS
// ============================================================================

/// Environment variable holding an `EnvFilter` directive for the bridge
pub const TRACING_FILTER_ENV: &str = "LOGLANE_LOG";

/// Field name tracing uses for the event message
pub const TRACING_MESSAGE_FIELD: &str = "message";
