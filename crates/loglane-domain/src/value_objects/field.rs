//! Context fields attached to records

use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Value Object: Context Value
///
/// Typed value of one context field. Primitive variants render natively;
/// `Display` carries the stable stringification of anything else.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Text
    Str(String),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
    /// Elapsed time, rendered in seconds
    Duration(Duration),
    /// Rendered error message
    Error(String),
    /// Stringified non-primitive value
    Display(String),
}

impl Value {
    /// Capture an error by its display text
    pub fn error<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::Error(err.to_string())
    }

    /// Stringify any `Display` value
    pub fn display<T: fmt::Display + ?Sized>(value: &T) -> Self {
        Self::Display(value.to_string())
    }

    /// Stringify any `Debug` value
    pub fn debug<T: fmt::Debug + ?Sized>(value: &T) -> Self {
        Self::Display(format!("{:?}", value))
    }

    /// Stringify a serializable value as compact JSON.
    ///
    /// Serialization failures are rendered in place rather than propagated.
    pub fn serialized<T: Serialize + ?Sized>(value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(json) => Self::Display(json),
            Err(err) => Self::Display(format!("<unserializable: {}>", err)),
        }
    }

    /// The text of a `Str` value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) | Self::Error(s) | Self::Display(s) => f.write_str(s),
            Self::Int(v) => write!(f, "{}", v),
            Self::UInt(v) => write!(f, "{}", v),
            Self::Float(v) => write!(f, "{}", v),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Duration(d) => write!(f, "{}", d.as_secs_f64()),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Self::Duration(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Self::Int(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Self::UInt(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for Value {
    fn from(value: isize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Self::UInt(value as u64)
    }
}

/// Value Object: Context Field
///
/// One `(key, value)` pair of record context.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name
    pub key: String,
    /// Field value
    pub value: Value,
}

impl Field {
    /// Create a field from anything convertible into a key and a value
    pub fn new<K: Into<String>, V: Into<Value>>(key: K, value: V) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A key/value pair dropped because its key was not text
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidPair {
    /// Index of the key in the alternating input
    pub position: usize,
    /// The offending key
    pub key: Value,
    /// The value that went with it
    pub value: Value,
}

/// Result of pairing an alternating key/value sequence
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedFields {
    /// Well-formed fields, in input order
    pub fields: Vec<Field>,
    /// Pairs dropped for having a non-text key
    pub invalid_pairs: Vec<InvalidPair>,
    /// Trailing element that had no value
    pub dangling: Option<Value>,
}

impl PairedFields {
    /// Pair up `key, value, key, value, ...`.
    ///
    /// Keys must be `Value::Str`. A pair with any other key is dropped and
    /// reported in `invalid_pairs`; a trailing unpaired element is reported in
    /// `dangling`.
    pub fn from_alternating<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        let mut paired = Self::default();
        let mut iter = values.into_iter().enumerate();

        while let Some((position, key)) = iter.next() {
            let Some((_, value)) = iter.next() else {
                paired.dangling = Some(key);
                break;
            };
            match key {
                Value::Str(key) => paired.fields.push(Field { key, value }),
                key => paired.invalid_pairs.push(InvalidPair {
                    position,
                    key,
                    value,
                }),
            }
        }

        paired
    }

    /// True when nothing was dropped
    pub fn is_clean(&self) -> bool {
        self.invalid_pairs.is_empty() && self.dangling.is_none()
    }
}
