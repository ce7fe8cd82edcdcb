//! Logger handle
//!
//! A [`Logger`] binds a severity filter, an encoder and a sink. Handles are
//! cheap to clone and share one core; [`Logger::with`] and
//! [`Logger::named`] derive new handles without touching the original.
//!
//! # Blocking
//!
//! Every leveled call is synchronous: it returns once the sink accepted the
//! record. With a file sink this includes waiting for the sink lock and, on
//! rotation, for compression and pruning. Configure `non_blocking` to hand
//! records to a bounded queue instead; calls then never block and records are
//! dropped when the queue is full.
//!
//! Nothing here panics or exits: `Fatal` and `Panic` are plain severities and
//! sink failures are reported through [`Diagnostics`].

mod builder;
mod reentrancy;

pub use builder::LoggerBuilder;

use crate::diagnostics::Diagnostics;
use crate::filter::LevelFilter;
use crate::sink::NullSink;
use loglane_domain::error::Result;
use loglane_domain::{Caller, Field, Level, LogSink, PairedFields, Record, RecordEncoder, Value};
use reentrancy::ReentrancyGuard;
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// True while the current thread is encoding or writing a record
pub(crate) fn in_write_path() -> bool {
    ReentrancyGuard::is_active()
}

pub(crate) struct LoggerCore {
    filter: LevelFilter,
    encoder: Box<dyn RecordEncoder>,
    sink: Arc<dyn LogSink>,
    diagnostics: Diagnostics,
    add_caller: bool,
    stacktrace_level: Option<Level>,
}

impl LoggerCore {
    fn write_record(&self, record: &Record) {
        let Some(_guard) = ReentrancyGuard::enter() else {
            return;
        };
        let mut buf = Vec::with_capacity(256);
        self.encoder.encode(record, &mut buf);
        if let Err(err) = self.sink.write(&buf) {
            self.diagnostics.report("dropped log record", &err);
        }
    }
}

/// Structured logger handle
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    name: Option<Arc<str>>,
    context: Arc<[Field]>,
}

impl Logger {
    /// Start building a logger that writes to `sink`
    pub fn builder(sink: Arc<dyn LogSink>) -> LoggerBuilder {
        LoggerBuilder::new(sink)
    }

    /// A logger that drops everything
    pub fn discard() -> Self {
        Self::builder(Arc::new(NullSink)).build()
    }

    /// The threshold shared by every handle of this core
    pub fn level_filter(&self) -> &LevelFilter {
        &self.core.filter
    }

    pub fn level(&self) -> Level {
        self.core.filter.level()
    }

    /// Change the threshold for every handle of this core
    pub fn set_level(&self, level: Level) {
        self.core.filter.set_level(level);
    }

    pub fn enabled(&self, level: Level) -> bool {
        self.core.filter.enabled(level)
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Context bound to this handle, in the order it was attached
    pub fn context(&self) -> &[Field] {
        &self.context
    }

    /// Derive a handle whose records also carry `fields`
    pub fn with<I>(&self, fields: I) -> Logger
    where
        I: IntoIterator<Item = Field>,
    {
        let context: Vec<Field> = self.context.iter().cloned().chain(fields).collect();
        Logger {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            context: context.into(),
        }
    }

    /// [`Logger::with`] for an alternating `key, value, ...` sequence
    #[track_caller]
    pub fn with_pairs<I>(&self, values: I) -> Logger
    where
        I: IntoIterator<Item = Value>,
    {
        let paired = PairedFields::from_alternating(values);
        self.report_misuse(&paired, Location::caller());
        self.with(paired.fields)
    }

    /// Derive a handle with `name` appended to the logger name
    pub fn named(&self, name: &str) -> Logger {
        let name: Arc<str> = match self.name.as_deref() {
            Some(parent) if !name.is_empty() => format!("{}.{}", parent, name).into(),
            Some(parent) => parent.into(),
            None => name.into(),
        };
        Logger {
            core: Arc::clone(&self.core),
            name: Some(name),
            context: Arc::clone(&self.context),
        }
    }

    #[track_caller]
    pub fn debug<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Debug, message, fields);
    }

    #[track_caller]
    pub fn info<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Info, message, fields);
    }

    #[track_caller]
    pub fn warn<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Warn, message, fields);
    }

    #[track_caller]
    pub fn error<I>(&self, message: &str, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.log(Level::Error, message, fields);
    }

    /// Emit at any level, including `Fatal` and `Panic`
    #[track_caller]
    pub fn log<I>(&self, level: Level, message: &str, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        if !self.enabled(level) {
            return;
        }
        let caller = self.caller_of(Location::caller());
        self.emit(level, message, fields.into_iter().collect(), caller, None);
    }

    /// Emit with context given as an alternating `key, value, ...` sequence.
    ///
    /// Pairs with a non-text key and a trailing key without value are dropped;
    /// each kind of misuse is reported as a separate `error` record first.
    #[track_caller]
    pub fn log_pairs<I>(&self, level: Level, message: &str, values: I)
    where
        I: IntoIterator<Item = Value>,
    {
        if !self.enabled(level) {
            return;
        }
        let location = Location::caller();
        let paired = PairedFields::from_alternating(values);
        self.report_misuse(&paired, location);
        self.emit(level, message, paired.fields, self.caller_of(location), None);
    }

    /// Sync the sink to durable storage
    pub fn flush(&self) -> Result<()> {
        self.core.sink.flush()
    }

    /// Flush and close the sink.
    ///
    /// File sinks reopen on the next write, so a late record after shutdown
    /// is still recorded.
    pub fn shutdown(&self) -> Result<()> {
        self.core.sink.flush()?;
        self.core.sink.close()
    }

    /// Emit a record produced outside this crate's call surface
    pub(crate) fn emit_external(
        &self,
        level: Level,
        target: &str,
        message: &str,
        fields: Vec<Field>,
        caller: Option<Caller>,
    ) {
        if !self.enabled(level) {
            return;
        }
        let caller = caller.filter(|_| self.core.add_caller);
        self.emit(level, message, fields, caller, Some(target));
    }

    fn caller_of(&self, location: &'static Location<'static>) -> Option<Caller> {
        self.core
            .add_caller
            .then(|| Caller::new(location.file(), location.line()))
    }

    fn emit(
        &self,
        level: Level,
        message: &str,
        fields: Vec<Field>,
        caller: Option<Caller>,
        target: Option<&str>,
    ) {
        let mut all = Vec::with_capacity(self.context.len() + fields.len());
        all.extend_from_slice(&self.context);
        all.extend(fields);

        let mut record = Record::new(level, message, all);
        match (self.name.as_deref(), target) {
            (Some(name), Some(target)) => {
                record = record.with_logger_name(format!("{}.{}", name, target));
            }
            (Some(name), None) => record = record.with_logger_name(name),
            (None, Some(target)) => record = record.with_logger_name(target),
            (None, None) => {}
        }
        if let Some(caller) = caller {
            record = record.with_caller(caller);
        }
        if self.core.stacktrace_level.is_some_and(|min| level >= min) {
            record = record.with_stacktrace(Backtrace::force_capture().to_string());
        }

        self.core.write_record(&record);
    }

    fn report_misuse(&self, paired: &PairedFields, location: &'static Location<'static>) {
        if paired.is_clean() || !self.enabled(Level::Error) {
            return;
        }
        let caller = self.caller_of(location);

        if !paired.invalid_pairs.is_empty() {
            let invalid = paired
                .invalid_pairs
                .iter()
                .map(|pair| format!("{}:{}={}", pair.position, pair.key, pair.value))
                .collect::<Vec<_>>()
                .join(", ");
            self.emit(
                Level::Error,
                "Ignored key-value pairs with non-string keys.",
                vec![Field::new("invalid", Value::Display(invalid))],
                caller.clone(),
                None,
            );
        }
        if let Some(dangling) = &paired.dangling {
            self.emit(
                Level::Error,
                "Ignored key without a value.",
                vec![Field::new("ignored", dangling.clone())],
                caller,
                None,
            );
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("context", &self.context)
            .finish()
    }
}
