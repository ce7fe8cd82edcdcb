//! Logger construction

use super::{Logger, LoggerCore};
use crate::config::LogConfig;
use crate::diagnostics::Diagnostics;
use crate::encoding::{ConsoleEncoder, EncoderLabels, encoder_for};
use crate::filter::LevelFilter;
use crate::logging::log_file_resolved;
use crate::sink::{ConsoleSink, NonBlockingSink, RotatingFileSink, TeeSink};
use loglane_domain::error::Result;
use loglane_domain::{Field, Level, LogSink, RecordEncoder};
use std::sync::Arc;

/// Builder for [`Logger`]
///
/// Defaults: console encoder with the standard labels, `debug` threshold,
/// caller annotation on, no stack traces, stderr diagnostics.
pub struct LoggerBuilder {
    sink: Arc<dyn LogSink>,
    encoder: Option<Box<dyn RecordEncoder>>,
    filter: LevelFilter,
    diagnostics: Option<Diagnostics>,
    add_caller: bool,
    stacktrace_level: Option<Level>,
    name: Option<String>,
    context: Vec<Field>,
}

impl LoggerBuilder {
    pub(super) fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            encoder: None,
            filter: LevelFilter::default(),
            diagnostics: None,
            add_caller: true,
            stacktrace_level: None,
            name: None,
            context: Vec::new(),
        }
    }

    pub fn encoder<E: RecordEncoder + 'static>(self, encoder: E) -> Self {
        self.boxed_encoder(Box::new(encoder))
    }

    pub fn boxed_encoder(mut self, encoder: Box<dyn RecordEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    /// Start with a fresh threshold at `level`
    pub fn level(mut self, level: Level) -> Self {
        self.filter = LevelFilter::new(level);
        self
    }

    /// Share an existing threshold (changes to it apply to this logger)
    pub fn level_filter(mut self, filter: LevelFilter) -> Self {
        self.filter = filter;
        self
    }

    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Annotate records with the calling file and line
    pub fn caller(mut self, enabled: bool) -> Self {
        self.add_caller = enabled;
        self
    }

    /// Attach a stack trace to records at or above `level`
    pub fn stacktrace_level(mut self, level: Option<Level>) -> Self {
        self.stacktrace_level = level;
        self
    }

    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Context carried by every record of the built logger
    pub fn fields<I: IntoIterator<Item = Field>>(mut self, fields: I) -> Self {
        self.context.extend(fields);
        self
    }

    pub fn build(self) -> Logger {
        let encoder = self
            .encoder
            .unwrap_or_else(|| Box::new(ConsoleEncoder::new(EncoderLabels::default())));

        Logger {
            core: Arc::new(LoggerCore {
                filter: self.filter,
                encoder,
                sink: self.sink,
                diagnostics: self.diagnostics.unwrap_or_default(),
                add_caller: self.add_caller,
                stacktrace_level: self.stacktrace_level,
            }),
            name: self.name.filter(|name| !name.is_empty()).map(Into::into),
            context: self.context.into(),
        }
    }
}

impl Logger {
    /// Build a logger from configuration.
    ///
    /// The log file is `root_path/file_name` behind a size-based rotating
    /// sink. Optionally teed to a console stream and moved behind a
    /// non-blocking queue.
    pub fn from_config(config: &LogConfig) -> Result<Self> {
        config.validate()?;

        let diagnostics = Diagnostics::stderr();
        let path = config.log_file_path();
        let file = RotatingFileSink::new(path.clone(), config.rotation.clone())?
            .with_diagnostics(diagnostics.clone());
        log_file_resolved(&path, &config.rotation);

        let mut sink: Arc<dyn LogSink> = Arc::new(file);
        if let Some(target) = config.console {
            sink = Arc::new(TeeSink::new(vec![sink, Arc::new(ConsoleSink::new(target))]));
        }
        if config.non_blocking {
            sink = Arc::new(NonBlockingSink::new(
                sink,
                config.buffered_lines_limit,
                diagnostics.clone(),
            ));
        }

        let mut builder = Logger::builder(sink)
            .boxed_encoder(encoder_for(config.format, config.labels.clone()))
            .level_filter(LevelFilter::from_config_str(&config.level))
            .diagnostics(diagnostics)
            .caller(config.caller)
            .stacktrace_level(config.stacktrace_level());
        if let Some(name) = &config.name {
            builder = builder.name(name.as_str());
        }

        Ok(builder.build())
    }
}
