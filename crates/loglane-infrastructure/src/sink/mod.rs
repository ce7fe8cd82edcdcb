//! Log sinks
//!
//! | Sink | Description |
//! |------|-------------|
//! | [`RotatingFileSink`] | Size-rotated, optionally compressed and pruned log file |
//! | [`ConsoleSink`] | Standard output or standard error |
//! | [`TeeSink`] | Fan-out to several sinks |
//! | [`NonBlockingSink`] | Bounded, lossy queue drained by a worker thread |
//! | [`MemorySink`] | In-process capture |
//! | [`NullSink`] | Discards everything |

mod compress;
mod console;
mod memory;
mod non_blocking;
mod rotating;
mod tee;

pub use compress::compress_file;
pub use console::{ConsoleSink, ConsoleTarget};
pub use memory::{MemorySink, NullSink};
pub use non_blocking::NonBlockingSink;
pub use rotating::{BackupFile, RotatingFileSink};
pub use tee::TeeSink;
