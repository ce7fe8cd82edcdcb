//! Value objects of the logging pipeline

mod field;
mod level;
mod record;
mod rotation;

pub use field::{Field, InvalidPair, PairedFields, Value};
pub use level::Level;
pub use record::{Caller, Record};
pub use rotation::RotationPolicy;
