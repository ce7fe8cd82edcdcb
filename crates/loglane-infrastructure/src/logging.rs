//! Tracing integration
//!
//! The library reports its own lifecycle (configuration loading, the resolved
//! log file) through `tracing`, so it shows up in whatever subscriber the
//! host installed. [`LoglaneLayer`] goes the other way: it forwards `tracing`
//! events into a [`Logger`], letting code instrumented with `tracing` write to
//! the rotating log file.

use crate::constants::{TRACING_FILTER_ENV, TRACING_MESSAGE_FIELD};
use crate::logger::{Logger, in_write_path};
use loglane_domain::error::{Error, Result};
use loglane_domain::{Caller, Field, Level, RotationPolicy, Value};
use std::fmt;
use std::path::Path;
use tracing::field::{Field as TracingField, Visit};
use tracing::{Event, Subscriber, info, warn};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!("Configuration loaded from {}", config_path.display());
    } else {
        warn!("Configuration file not found: {}", config_path.display());
    }
}

/// Log where a file logger writes and how it rotates
pub fn log_file_resolved(path: &Path, policy: &RotationPolicy) {
    info!(
        path = %path.display(),
        max_size_bytes = policy.max_size_bytes,
        max_backups = policy.max_backups,
        max_age_days = policy.max_age_days,
        compress = policy.compress,
        "Log file resolved"
    );
}

/// Map a `tracing` level onto a record severity (`TRACE` folds into `debug`)
pub fn level_from_tracing(level: &tracing::Level) -> Level {
    match *level {
        tracing::Level::ERROR => Level::Error,
        tracing::Level::WARN => Level::Warn,
        tracing::Level::INFO => Level::Info,
        _ => Level::Debug,
    }
}

/// The `EnvFilter` directive closest to a record severity
pub fn tracing_directive(level: Level) -> &'static str {
    match level {
        Level::Debug => "debug",
        Level::Info => "info",
        Level::Warn => "warn",
        Level::Error | Level::Fatal | Level::Panic => "error",
    }
}

/// `tracing_subscriber` layer writing events to a [`Logger`]
///
/// The event target is appended to the logger name; event fields become
/// record context in declaration order.
#[derive(Debug, Clone)]
pub struct LoglaneLayer {
    logger: Logger,
}

impl LoglaneLayer {
    pub fn new(logger: Logger) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for LoglaneLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        // Events raised while this thread writes a record would recurse.
        if in_write_path() {
            return;
        }
        let metadata = event.metadata();
        let level = level_from_tracing(metadata.level());
        if !self.logger.enabled(level) {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let caller = metadata
            .file()
            .zip(metadata.line())
            .map(|(file, line)| Caller::new(file, line));
        self.logger.emit_external(
            level,
            metadata.target(),
            &visitor.message,
            visitor.fields,
            caller,
        );
    }
}

#[derive(Default)]
struct EventVisitor {
    message: String,
    fields: Vec<Field>,
}

impl EventVisitor {
    fn push(&mut self, field: &TracingField, value: Value) {
        if field.name() == TRACING_MESSAGE_FIELD {
            self.message = value.to_string();
        } else {
            self.fields.push(Field::new(field.name(), value));
        }
    }
}

impl Visit for EventVisitor {
    fn record_f64(&mut self, field: &TracingField, value: f64) {
        self.push(field, Value::Float(value));
    }

    fn record_i64(&mut self, field: &TracingField, value: i64) {
        self.push(field, Value::Int(value));
    }

    fn record_u64(&mut self, field: &TracingField, value: u64) {
        self.push(field, Value::UInt(value));
    }

    fn record_bool(&mut self, field: &TracingField, value: bool) {
        self.push(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &TracingField, value: &str) {
        self.push(field, Value::from(value));
    }

    fn record_error(&mut self, field: &TracingField, value: &(dyn std::error::Error + 'static)) {
        self.push(field, Value::error(value));
    }

    fn record_debug(&mut self, field: &TracingField, value: &dyn fmt::Debug) {
        self.push(field, Value::debug(value));
    }
}

/// Install a global `tracing` subscriber that forwards events to `logger`.
///
/// Events are pre-filtered by the `LOGLANE_LOG` directive when set, otherwise
/// by the logger's current threshold.
pub fn init_tracing_bridge(logger: Logger) -> Result<()> {
    let filter = EnvFilter::try_from_env(TRACING_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(tracing_directive(logger.level())));

    tracing_subscriber::registry()
        .with(filter)
        .with(LoglaneLayer::new(logger))
        .try_init()
        .map_err(|err| {
            Error::configuration_with_source("Failed to install tracing subscriber", err)
        })
}
