//! Configuration
//!
//! [`LogConfig`] describes one logger: where its file lives, the threshold,
//! the output format and the rotation policy. [`ConfigLoader`] merges
//! defaults, a TOML file and `LOGLANE__*` environment variables into it.

pub mod loader;
pub mod types;

pub use crate::encoding::LogFormat;
pub use loader::ConfigLoader;
pub use types::LogConfig;
