//! Machine-oriented JSON encoder

use super::{EncoderLabels, format_time};
use crate::constants::COLLIDING_FIELD_PREFIX;
use loglane_domain::{Record, RecordEncoder, Value};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::HashSet;

/// One JSON object per line, keys in the fixed field order
///
/// Context keys that collide with a record label are emitted under
/// `fields.<key>`, prefixed again while that name is taken by a label or by
/// another context key. A repeated context key keeps its first position and
/// takes the last value.
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    labels: EncoderLabels,
}

impl JsonEncoder {
    pub fn new(labels: EncoderLabels) -> Self {
        Self { labels }
    }
}

fn float_value(v: f64) -> JsonValue {
    match Number::from_f64(v) {
        Some(n) => JsonValue::Number(n),
        None if v.is_nan() => JsonValue::String("NaN".to_string()),
        None if v > 0.0 => JsonValue::String("+Inf".to_string()),
        None => JsonValue::String("-Inf".to_string()),
    }
}

fn json_value(value: &Value) -> JsonValue {
    match value {
        Value::Str(s) | Value::Error(s) | Value::Display(s) => JsonValue::String(s.clone()),
        Value::Int(v) => JsonValue::from(*v),
        Value::UInt(v) => JsonValue::from(*v),
        Value::Float(v) => float_value(*v),
        Value::Bool(v) => JsonValue::Bool(*v),
        Value::Duration(d) => float_value(d.as_secs_f64()),
    }
}

impl RecordEncoder for JsonEncoder {
    fn encode(&self, record: &Record, buf: &mut Vec<u8>) {
        let labels = &self.labels;
        let mut object = Map::new();

        let mut put = |label: &str, value: JsonValue| {
            if !label.is_empty() {
                object.insert(label.to_string(), value);
            }
        };
        put(&labels.time, JsonValue::String(format_time(record)));
        put(&labels.level, JsonValue::String(record.level().as_str().to_string()));
        if let Some(name) = record.logger_name() {
            put(&labels.name, JsonValue::String(name.to_string()));
        }
        if let Some(caller) = record.caller() {
            put(&labels.caller, JsonValue::String(caller.short()));
        }
        put(&labels.message, JsonValue::String(record.message().to_string()));
        if let Some(stacktrace) = record.stacktrace() {
            put(&labels.stacktrace, JsonValue::String(stacktrace.to_string()));
        }

        let fields = record.fields();
        let taken: HashSet<&str> = if fields.iter().any(|f| labels.is_label(&f.key)) {
            fields
                .iter()
                .map(|f| f.key.as_str())
                .filter(|key| !labels.is_label(key))
                .collect()
        } else {
            HashSet::new()
        };

        for field in fields {
            let mut key = field.key.clone();
            if labels.is_label(&key) {
                key.insert_str(0, COLLIDING_FIELD_PREFIX);
                while labels.is_label(&key) || taken.contains(key.as_str()) {
                    key.insert_str(0, COLLIDING_FIELD_PREFIX);
                }
            }
            object.insert(key, json_value(&field.value));
        }

        buf.extend_from_slice(JsonValue::Object(object).to_string().as_bytes());
        buf.push(b'\n');
    }
}
