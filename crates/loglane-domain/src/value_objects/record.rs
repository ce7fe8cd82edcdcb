//! The structured unit emitted per log call

use crate::value_objects::{Field, Level};
use chrono::{DateTime, FixedOffset, Local};
use std::fmt;

/// Source location of a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    /// Source file as reported by the compiler
    pub file: String,
    /// Line within `file`
    pub line: u32,
}

impl Caller {
    /// Create a caller location
    pub fn new<S: Into<String>>(file: S, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Location of whoever called the `#[track_caller]` function
    #[track_caller]
    pub fn here() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line())
    }

    /// `dir/file.rs:line`, keeping only the last directory of the path
    pub fn short(&self) -> String {
        let path = self.file.as_str();
        let trimmed = match path.rfind(['/', '\\']) {
            Some(last) => match path[..last].rfind(['/', '\\']) {
                Some(prev) => &path[prev + 1..],
                None => path,
            },
            None => path,
        };
        format!("{}:{}", trimmed, self.line)
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Value Object: Log Record
///
/// One timestamped, leveled entry. Built once by the logger and only read
/// afterwards: there are no `&mut` accessors.
///
/// ## Example
///
/// ```rust
/// use loglane_domain::{Field, Level, Record};
///
/// let record = Record::new(Level::Info, "user logged in", vec![Field::new("user", "a")])
///     .with_logger_name("auth");
/// assert_eq!(record.level(), Level::Info);
/// assert_eq!(record.fields().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    time: DateTime<FixedOffset>,
    level: Level,
    logger_name: Option<String>,
    caller: Option<Caller>,
    message: String,
    fields: Vec<Field>,
    stacktrace: Option<String>,
}

impl Record {
    /// Create a record stamped with the current local time
    pub fn new<S: Into<String>>(level: Level, message: S, fields: Vec<Field>) -> Self {
        Self {
            time: Local::now().fixed_offset(),
            level,
            logger_name: None,
            caller: None,
            message: message.into(),
            fields,
            stacktrace: None,
        }
    }

    /// Replace the timestamp
    pub fn with_time(mut self, time: DateTime<FixedOffset>) -> Self {
        self.time = time;
        self
    }

    /// Set the logger name
    pub fn with_logger_name<S: Into<String>>(mut self, name: S) -> Self {
        self.logger_name = Some(name.into());
        self
    }

    /// Set the call-site location
    pub fn with_caller(mut self, caller: Caller) -> Self {
        self.caller = Some(caller);
        self
    }

    /// Attach a stack trace
    pub fn with_stacktrace<S: Into<String>>(mut self, stacktrace: S) -> Self {
        self.stacktrace = Some(stacktrace.into());
        self
    }

    pub fn time(&self) -> &DateTime<FixedOffset> {
        &self.time
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn logger_name(&self) -> Option<&str> {
        self.logger_name.as_deref()
    }

    pub fn caller(&self) -> Option<&Caller> {
        self.caller.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Context fields, bound context first then call-site fields
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn stacktrace(&self) -> Option<&str> {
        self.stacktrace.as_deref()
    }
}
