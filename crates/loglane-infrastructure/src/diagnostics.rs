//! Rate-limited self-diagnostics
//!
//! When a sink fails, the record is dropped and a note goes to a fallback
//! stream (stderr by default). Only one note is written per interval; the
//! number of notes swallowed in between is carried into the next one.

use crate::constants::{DIAGNOSTIC_INTERVAL, DIAGNOSTIC_PREFIX};
use std::fmt;
use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const NEVER: u64 = u64::MAX;

type DiagnosticWriter = Box<dyn Write + Send>;

struct DiagnosticsInner {
    interval: Duration,
    origin: Instant,
    last_emit_ms: AtomicU64,
    suppressed: AtomicU64,
    writer: Mutex<DiagnosticWriter>,
}

/// Fallback channel for failures of the logging pipeline itself
///
/// Cheap to clone; clones share the rate limit.
#[derive(Clone)]
pub struct Diagnostics {
    inner: Arc<DiagnosticsInner>,
}

impl Diagnostics {
    /// Diagnostics on stderr with the default interval
    pub fn stderr() -> Self {
        Self::with_writer(Box::new(std::io::stderr()), DIAGNOSTIC_INTERVAL)
    }

    /// Diagnostics on an arbitrary writer
    pub fn with_writer(writer: DiagnosticWriter, interval: Duration) -> Self {
        Self {
            inner: Arc::new(DiagnosticsInner {
                interval,
                origin: Instant::now(),
                last_emit_ms: AtomicU64::new(NEVER),
                suppressed: AtomicU64::new(0),
                writer: Mutex::new(writer),
            }),
        }
    }

    /// Report a failure. Returns whether a line was actually written.
    pub fn report(&self, context: &str, err: &dyn fmt::Display) -> bool {
        let inner = &self.inner;
        let now = inner.origin.elapsed().as_millis() as u64;
        let last = inner.last_emit_ms.load(Ordering::Acquire);
        let interval = inner.interval.as_millis() as u64;

        if last != NEVER && now.saturating_sub(last) < interval {
            inner.suppressed.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        if inner
            .last_emit_ms
            .compare_exchange(last, now, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            inner.suppressed.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let suppressed = inner.suppressed.swap(0, Ordering::Relaxed);
        let line = if suppressed > 0 {
            format!(
                "{}: {}: {} ({} similar messages suppressed)\n",
                DIAGNOSTIC_PREFIX, context, err, suppressed
            )
        } else {
            format!("{}: {}: {}\n", DIAGNOSTIC_PREFIX, context, err)
        };

        let mut writer = match inner.writer.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        // Nowhere left to report a failing fallback stream.
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
        true
    }

    /// Number of reports swallowed since the last written line
    pub fn suppressed(&self) -> u64 {
        self.inner.suppressed.load(Ordering::Relaxed)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::stderr()
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("interval", &self.inner.interval)
            .field("suppressed", &self.suppressed())
            .finish()
    }
}
