//! Record encoders
//!
//! Both encoders emit the same fixed field order: time, level, logger name,
//! caller, message, stack trace, then context fields. Every record becomes
//! exactly one `\n`-terminated line; embedded line breaks and backslashes are
//! escaped.

mod console;
mod json;
mod labels;

pub use console::ConsoleEncoder;
pub use json::JsonEncoder;
pub use labels::EncoderLabels;

use crate::constants::TIME_FORMAT;
use loglane_domain::{Record, RecordEncoder};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Output format of the log file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Tab-separated header with logfmt context
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

/// Build the encoder for a format
pub fn encoder_for(format: LogFormat, labels: EncoderLabels) -> Box<dyn RecordEncoder> {
    match format {
        LogFormat::Console => Box::new(ConsoleEncoder::new(labels)),
        LogFormat::Json => Box::new(JsonEncoder::new(labels)),
    }
}

/// Sortable, human-readable timestamp of a record
pub fn format_time(record: &Record) -> String {
    record.time().format(TIME_FORMAT).to_string()
}

/// Escape characters that would break the one-record-per-line layout
pub(crate) fn escape_line(s: &str) -> Cow<'_, str> {
    if !s.contains(['\\', '\n', '\r', '\t']) {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 8);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Render a logfmt key or value, quoting it when it is not a bare token
pub(crate) fn logfmt_token(s: &str) -> Cow<'_, str> {
    let needs_quotes = s.is_empty()
        || s
            .chars()
            .any(|c| c.is_whitespace() || c.is_control() || c == '=' || c == '"');
    if !needs_quotes {
        return Cow::Borrowed(s);
    }
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{{{:04x}}}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    Cow::Owned(out)
}
