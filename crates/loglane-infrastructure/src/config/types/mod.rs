//! Configuration types module

pub mod logging;

pub use logging::LogConfig;
