//! # Loglane
//!
//! Structured, leveled logging into a size-rotated file.
//!
//! Every record carries a timestamp, a severity, an optional logger name and
//! caller location, a message and an ordered list of typed context fields.
//! Records below the configured threshold are dropped before any work is
//! done; the rest are encoded to one line each and appended to the log file.
//! When the file would outgrow its size limit it is rotated into numbered,
//! optionally gzip-compressed backups, pruned by count and age.
//!
//! ## Example
//!
//! ```no_run
//! use loglane::{LogConfig, fields};
//!
//! let config = LogConfig {
//!     root_path: "/var/log/app".into(),
//!     file_name: "app.log".into(),
//!     level: "warn".to_string(),
//!     ..LogConfig::default()
//! };
//! let logger = loglane::init(&config)?;
//!
//! logger.info("not written", fields![]);
//! let request = logger.with(fields!["request_id" => 42]);
//! request.error("payment failed", fields!["user" => "a"]);
//!
//! loglane::shutdown()?;
//! # Ok::<(), loglane::Error>(())
//! ```
//!
//! ## Architecture
//!
//! - `domain` - records, levels, context values and the sink/encoder ports
//! - `infrastructure` - encoders, the rotating sink, the logger and configuration

/// Domain layer - records, levels and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use loglane_domain::*;
}

/// Infrastructure layer - encoders, sinks, logger and configuration
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use loglane_infrastructure::*;
}

mod global;

pub use global::{
    debug, error, flush, global, info, init, install, is_initialized, log, log_pairs, named,
    set_level, shutdown, warn, with,
};

// Re-export commonly used types at the crate root
pub use domain::{Caller, Error, Field, Level, Record, Result, RotationPolicy, Value};
pub use infrastructure::{ConfigLoader, LogConfig, LogFormat, Logger, LoggerBuilder};

/// Build an array of context fields
///
/// ```
/// use loglane::{Field, fields};
///
/// let context = fields!["user" => "a", "attempt" => 3];
/// assert_eq!(context[0], Field::new("user", "a"));
/// assert_eq!(fields![].len(), 0);
/// ```
#[macro_export]
macro_rules! fields {
    () => {{
        let empty: [$crate::Field; 0] = [];
        empty
    }};
    ($($key:expr => $value:expr),+ $(,)?) => {
        [$($crate::Field::new($key, $value)),+]
    };
}

/// Build a vector of alternating keys and values for [`Logger::log_pairs`]
///
/// ```
/// use loglane::{Value, pairs};
///
/// let context = pairs!["user", "a", "attempt", 3];
/// assert_eq!(context[1], Value::from("a"));
/// ```
#[macro_export]
macro_rules! pairs {
    ($($item:expr),* $(,)?) => {
        ::std::vec![$($crate::Value::from($item)),*]
    };
}
