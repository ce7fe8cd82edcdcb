//! # Domain Layer
//!
//! Core types of the loglane logging pipeline. Nothing in this crate touches
//! the filesystem or a terminal; it defines what a log record is and the ports
//! that encoders and sinks implement.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | `Level`, `Field`/`Value`, `Record`, `RotationPolicy` |
//! | [`ports`] | `RecordEncoder` and `LogSink` traits |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | Level and rotation defaults |

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{LogSink, RecordEncoder};
pub use value_objects::{
    Caller, Field, InvalidPair, Level, PairedFields, Record, RotationPolicy, Value,
};
