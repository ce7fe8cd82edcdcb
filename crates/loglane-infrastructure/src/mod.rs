//! # Infrastructure Layer
//!
//! Everything that turns a domain [`Record`](loglane_domain::Record) into a
//! line on disk.
//!
//! ## Module Categories
//!
//! ### Pipeline
//! | Module | Description |
//! |--------|-------------|
//! | [`filter`] | Shared, atomically adjustable severity threshold |
//! | [`encoding`] | Console and JSON record encoders |
//! | [`sink`] | Rotating file sink, console/tee/memory sinks, non-blocking delivery |
//! | [`logger`] | `Logger` handle and builder binding filter, encoder and sink |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment-backed configuration loading and validation |
//! | [`diagnostics`] | Rate-limited self-diagnostics on stderr |
//! | [`logging`] | `tracing` bridge into a `Logger` |
//! | [`constants`] | Centralized configuration constants |

pub mod config;
pub mod constants;
pub mod diagnostics;
pub mod encoding;
pub mod error_ext;
pub mod filter;
pub mod logger;
pub mod logging;
pub mod sink;

// Re-export commonly used types
pub use config::{ConfigLoader, LogConfig, LogFormat};
pub use diagnostics::Diagnostics;
pub use error_ext::ErrorContext;
pub use filter::LevelFilter;
pub use logger::{Logger, LoggerBuilder};
pub use sink::RotatingFileSink;
