//! Tests for the auxiliary sinks and backup compression

use crate::test_utils::captured_diagnostics;
use flate2::read::GzDecoder;
use loglane_domain::{Error, LogSink, Result};
use loglane_infrastructure::Diagnostics;
use loglane_infrastructure::sink::{MemorySink, NonBlockingSink, TeeSink, compress_file};
use std::fs::{self, File};
use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

#[test]
fn test_tee_writes_to_every_sink() {
    let first = Arc::new(MemorySink::new());
    let second = Arc::new(MemorySink::new());
    let tee = TeeSink::new(vec![first.clone() as Arc<dyn LogSink>]).with(second.clone());

    tee.write(b"line\n").unwrap();

    assert_eq!(tee.len(), 2);
    assert_eq!(first.contents(), "line\n");
    assert_eq!(second.contents(), "line\n");
}

#[test]
fn test_tee_continues_past_failure() {
    let failing = Arc::new(MemorySink::new());
    let healthy = Arc::new(MemorySink::new());
    failing.set_failing(true);
    let tee = TeeSink::new(vec![failing.clone() as Arc<dyn LogSink>, healthy.clone()]);

    assert!(tee.write(b"line\n").is_err());
    assert_eq!(healthy.contents(), "line\n");
}

#[test]
fn test_memory_sink_clear() {
    let sink = MemorySink::new();
    sink.write(b"a\nb\n").unwrap();
    assert_eq!(sink.lines(), vec!["a", "b"]);

    sink.clear();
    assert!(sink.contents().is_empty());
    assert_eq!(sink.write_count(), 1);
}

#[test]
fn test_compress_file_replaces_source() {
    let dir = TempDir::new().unwrap();
    let src = dir.path().join("app.log.1");
    let dst = dir.path().join("app.log.1.gz");
    fs::write(&src, b"first\nsecond\n").unwrap();
    let old = SystemTime::now() - Duration::from_secs(3 * 86_400);
    File::options()
        .write(true)
        .open(&src)
        .unwrap()
        .set_modified(old)
        .unwrap();

    compress_file(&src, &dst).unwrap();

    assert!(!src.exists());
    let mut decoded = String::new();
    GzDecoder::new(File::open(&dst).unwrap())
        .read_to_string(&mut decoded)
        .unwrap();
    assert_eq!(decoded, "first\nsecond\n");

    let modified = fs::metadata(&dst).unwrap().modified().unwrap();
    let drift = modified
        .duration_since(old)
        .unwrap_or_else(|e| e.duration());
    assert!(drift < Duration::from_secs(1));
}

#[test]
fn test_compress_missing_source_fails() {
    let dir = TempDir::new().unwrap();
    let dst = dir.path().join("out.gz");
    assert!(compress_file(&dir.path().join("missing"), &dst).is_err());
    assert!(!dst.exists());
}

#[test]
fn test_non_blocking_drains_on_close() {
    let inner = Arc::new(MemorySink::new());
    let sink = NonBlockingSink::new(inner.clone(), 1024, Diagnostics::default());

    for i in 0..50 {
        sink.write(format!("record {}\n", i).as_bytes()).unwrap();
    }
    sink.close().unwrap();

    let lines = inner.lines();
    assert_eq!(lines.len(), 50);
    assert_eq!(lines[49], "record 49");
    assert!(matches!(
        sink.write(b"late\n"),
        Err(Error::SinkClosed { .. })
    ));
}

/// Memory sink whose writes wait until the test releases the gate
struct GatedSink {
    gate: Arc<Mutex<()>>,
    inner: MemorySink,
}

impl LogSink for GatedSink {
    fn write(&self, buf: &[u8]) -> Result<()> {
        let _open = self.gate.lock().unwrap();
        self.inner.write(buf)
    }

    fn flush(&self) -> Result<()> {
        self.inner.flush()
    }

    fn close(&self) -> Result<()> {
        self.inner.close()
    }
}

#[test]
fn test_non_blocking_reports_dropped_records() {
    let gate = Arc::new(Mutex::new(()));
    let inner = Arc::new(GatedSink {
        gate: Arc::clone(&gate),
        inner: MemorySink::new(),
    });
    let (diagnostics, captured) = captured_diagnostics();
    let sink = NonBlockingSink::new(inner.clone(), 1, diagnostics);

    let held = gate.lock().unwrap();
    for i in 0..20 {
        sink.write(format!("record {}\n", i).as_bytes()).unwrap();
    }
    let dropped = sink.dropped_records();
    assert!(dropped >= 10, "only {} records dropped", dropped);
    assert!(captured.contents().contains("log queue full"));

    drop(held);
    sink.close().unwrap();
    assert_eq!(inner.inner.lines().len(), 20 - dropped);
}
