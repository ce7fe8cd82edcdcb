//! Fan-out sink

use loglane_domain::LogSink;
use loglane_domain::error::Result;
use std::sync::Arc;

/// Writes every record to each inner sink in order
///
/// A failing sink does not stop the others; the first error is returned
/// after all sinks were tried.
#[derive(Clone, Default)]
pub struct TeeSink {
    sinks: Vec<Arc<dyn LogSink>>,
}

impl TeeSink {
    pub fn new(sinks: Vec<Arc<dyn LogSink>>) -> Self {
        Self { sinks }
    }

    /// Add another destination
    pub fn with(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    fn each<F>(&self, mut op: F) -> Result<()>
    where
        F: FnMut(&dyn LogSink) -> Result<()>,
    {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(err) = op(sink.as_ref()) {
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

impl LogSink for TeeSink {
    fn write(&self, buf: &[u8]) -> Result<()> {
        self.each(|sink| sink.write(buf))
    }

    fn flush(&self) -> Result<()> {
        self.each(|sink| sink.flush())
    }

    fn close(&self) -> Result<()> {
        self.each(|sink| sink.close())
    }
}
