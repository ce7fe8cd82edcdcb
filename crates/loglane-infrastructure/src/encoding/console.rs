//! Human-oriented console encoder
//!
//! ```text
//! 2024-01-02T15:04:05.123+0000	error	auth	src/login.rs:42	login failed	user=a attempt=3
//! ```

use super::{EncoderLabels, escape_line, format_time, logfmt_token};
use loglane_domain::{Record, RecordEncoder, Value};

/// Tab-separated header fields followed by logfmt context
#[derive(Debug, Clone, Default)]
pub struct ConsoleEncoder {
    labels: EncoderLabels,
}

impl ConsoleEncoder {
    pub fn new(labels: EncoderLabels) -> Self {
        Self { labels }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::Str(s) | Value::Error(s) | Value::Display(s) => logfmt_token(s).into_owned(),
        other => other.to_string(),
    }
}

impl RecordEncoder for ConsoleEncoder {
    fn encode(&self, record: &Record, buf: &mut Vec<u8>) {
        let labels = &self.labels;
        let mut header: Vec<String> = Vec::with_capacity(5);

        if !labels.time.is_empty() {
            header.push(format_time(record));
        }
        if !labels.level.is_empty() {
            header.push(record.level().as_str().to_string());
        }
        if let Some(name) = record.logger_name().filter(|_| !labels.name.is_empty()) {
            header.push(escape_line(name).into_owned());
        }
        if let Some(caller) = record.caller().filter(|_| !labels.caller.is_empty()) {
            header.push(caller.short());
        }
        if !labels.message.is_empty() {
            header.push(escape_line(record.message()).into_owned());
        }

        let mut context: Vec<String> = Vec::with_capacity(record.fields().len() + 1);
        if let Some(stacktrace) = record.stacktrace().filter(|_| !labels.stacktrace.is_empty()) {
            context.push(format!(
                "{}={}",
                logfmt_token(&labels.stacktrace),
                logfmt_token(stacktrace)
            ));
        }
        for field in record.fields() {
            context.push(format!(
                "{}={}",
                logfmt_token(&field.key),
                render_value(&field.value)
            ));
        }

        buf.extend_from_slice(header.join("\t").as_bytes());
        if !context.is_empty() {
            buf.push(b'\t');
            buf.extend_from_slice(context.join(" ").as_bytes());
        }
        buf.push(b'\n');
    }
}
