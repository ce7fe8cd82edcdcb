//! Fire-and-forget delivery through a bounded queue
//!
//! Records are handed to a `tracing_appender` worker thread that writes them
//! to the wrapped sink. Callers never block: when the queue is full the record
//! is dropped and the loss is reported through [`Diagnostics`]. Closing the
//! sink drains the queue before closing the inner sink.

use crate::constants::NON_BLOCKING_THREAD_NAME;
use crate::diagnostics::Diagnostics;
use crate::error_ext::ErrorContext;
use loglane_domain::LogSink;
use loglane_domain::error::{Error, Result};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing_appender::non_blocking::{
    ErrorCounter, NonBlocking, NonBlockingBuilder, WorkerGuard,
};

/// Adapts a [`LogSink`] to the `io::Write` the worker thread expects
struct SinkWriter {
    sink: Arc<dyn LogSink>,
    diagnostics: Diagnostics,
}

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The worker has no caller to hand the error back to.
        if let Err(err) = self.sink.write(buf) {
            self.diagnostics.report("failed to write log record", &err);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink
            .flush()
            .map_err(|err| io::Error::other(err.to_string()))
    }
}

/// Queue in front of another sink
pub struct NonBlockingSink {
    writer: NonBlocking,
    guard: Mutex<Option<WorkerGuard>>,
    closed: AtomicBool,
    inner: Arc<dyn LogSink>,
    dropped: ErrorCounter,
    reported_drops: AtomicUsize,
    diagnostics: Diagnostics,
}

impl NonBlockingSink {
    /// Start the worker thread for `inner` with room for `buffered_lines_limit` records
    pub fn new(
        inner: Arc<dyn LogSink>,
        buffered_lines_limit: usize,
        diagnostics: Diagnostics,
    ) -> Self {
        let (writer, guard) = NonBlockingBuilder::default()
            .lossy(true)
            .buffered_lines_limit(buffered_lines_limit)
            .thread_name(NON_BLOCKING_THREAD_NAME)
            .finish(SinkWriter {
                sink: Arc::clone(&inner),
                diagnostics: diagnostics.clone(),
            });

        Self {
            dropped: writer.error_counter(),
            writer,
            guard: Mutex::new(Some(guard)),
            closed: AtomicBool::new(false),
            inner,
            reported_drops: AtomicUsize::new(0),
            diagnostics,
        }
    }

    /// Records discarded so far because the queue was full
    pub fn dropped_records(&self) -> usize {
        self.dropped.dropped_lines()
    }

    fn report_drops(&self) {
        let dropped = self.dropped.dropped_lines();
        let reported = self.reported_drops.load(Ordering::Acquire);
        if dropped <= reported {
            return;
        }
        if self
            .reported_drops
            .compare_exchange(reported, dropped, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.diagnostics.report(
                "log queue full",
                &format!("{} records dropped", dropped - reported),
            );
        }
    }
}

impl LogSink for NonBlockingSink {
    fn write(&self, buf: &[u8]) -> Result<()> {
        if self.closed.load(Ordering::Acquire) {
            return Err(Error::sink_closed("non-blocking sink was shut down"));
        }
        let result = self
            .writer
            .clone()
            .write_all(buf)
            .io_context("Failed to enqueue log record");
        self.report_drops();
        result
    }

    /// Syncs what the worker has already written; queued records may still be pending.
    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn close(&self) -> Result<()> {
        self.closed.store(true, Ordering::Release);
        let guard = self
            .guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        // Dropping the guard blocks until the worker drained the queue.
        drop(guard);
        self.report_drops();
        self.inner.close()
    }
}
