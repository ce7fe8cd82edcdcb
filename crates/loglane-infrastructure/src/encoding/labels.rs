//! Field labels used by the encoders

use crate::constants::{
    DEFAULT_CALLER_LABEL, DEFAULT_LEVEL_LABEL, DEFAULT_MESSAGE_LABEL, DEFAULT_NAME_LABEL,
    DEFAULT_STACKTRACE_LABEL, DEFAULT_TIME_LABEL,
};
use loglane_domain::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Names under which the record header fields are emitted
///
/// An empty label omits that field from the output. Non-empty labels must be
/// distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderLabels {
    pub time: String,
    pub level: String,
    pub name: String,
    pub caller: String,
    pub message: String,
    pub stacktrace: String,
}

impl Default for EncoderLabels {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME_LABEL.to_string(),
            level: DEFAULT_LEVEL_LABEL.to_string(),
            name: DEFAULT_NAME_LABEL.to_string(),
            caller: DEFAULT_CALLER_LABEL.to_string(),
            message: DEFAULT_MESSAGE_LABEL.to_string(),
            stacktrace: DEFAULT_STACKTRACE_LABEL.to_string(),
        }
    }
}

impl EncoderLabels {
    /// Labels in emission order
    pub fn in_order(&self) -> [&str; 6] {
        [
            &self.time,
            &self.level,
            &self.name,
            &self.caller,
            &self.message,
            &self.stacktrace,
        ]
    }

    /// Whether `key` is one of the non-empty labels
    pub fn is_label(&self, key: &str) -> bool {
        !key.is_empty() && self.in_order().contains(&key)
    }

    /// Reject mappings where two fields share a label
    pub fn validate(&self) -> Result<()> {
        let labels = self.in_order();
        for (i, label) in labels.iter().enumerate() {
            if label.is_empty() {
                continue;
            }
            if labels[i + 1..].contains(label) {
                return Err(Error::configuration(format!(
                    "Encoder label '{}' is used for more than one field",
                    label
                )));
            }
        }
        Ok(())
    }
}
