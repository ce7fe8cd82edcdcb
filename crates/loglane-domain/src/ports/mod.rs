//! Ports implemented by the infrastructure layer
//!
//! The logger core only talks to encoders and sinks through these traits, so
//! file, console and in-memory outputs are interchangeable.

use crate::error::Result;
use crate::value_objects::Record;

/// Renders a record into bytes
///
/// Implementations must be deterministic and must not fail: whatever a record
/// holds, exactly one line (terminated by `\n`) is appended to `buf`.
pub trait RecordEncoder: Send + Sync {
    /// Append the encoded record to `buf`
    fn encode(&self, record: &Record, buf: &mut Vec<u8>);
}

/// Durable destination for encoded records
///
/// Each `write` call carries one complete encoded record. Implementations
/// serialize concurrent writers so records never interleave.
pub trait LogSink: Send + Sync {
    /// Append one encoded record
    fn write(&self, buf: &[u8]) -> Result<()>;

    /// Push buffered bytes to durable storage
    fn flush(&self) -> Result<()>;

    /// Flush and release the underlying resource
    fn close(&self) -> Result<()>;
}
