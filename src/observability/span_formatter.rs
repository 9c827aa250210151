//! Flat JSON rendering of finished spans.
//!
//! Each span becomes one self-contained JSON object, written as one line:
//!
//! ```json
//! {"service":"panenav","trace_id":"…","span_id":"…","parent_span_id":"…",
//!  "name":"handle_event","start_unix_nano":1700000000000000000,
//!  "duration_us":42,"status":"unset","attributes":{"event_type":"BackPressed"},
//!  "events":[{"name":"back pressed","offset_us":3,"attributes":{}}]}
//! ```
//!
//! Attribute values keep their JSON type; arrays are rendered as arrays.

use opentelemetry::trace::{SpanId, Status};
use opentelemetry::{Array, KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use serde_json::{json, Map, Value as JsonValue};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone)]
pub struct SpanFormatter {
    service: String,
}

impl SpanFormatter {
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    #[must_use]
    pub fn format_span(&self, span: &SpanData) -> JsonValue {
        let mut object = Map::new();
        object.insert("service".into(), json!(self.service));
        object.insert("trace_id".into(), json!(span.span_context.trace_id().to_string()));
        object.insert("span_id".into(), json!(span.span_context.span_id().to_string()));
        if span.parent_span_id != SpanId::INVALID {
            object.insert("parent_span_id".into(), json!(span.parent_span_id.to_string()));
        }
        object.insert("name".into(), json!(span.name));
        object.insert("start_unix_nano".into(), json!(unix_nanos(span.start_time)));
        object.insert(
            "duration_us".into(),
            json!(micros_between(span.start_time, span.end_time)),
        );
        object.insert("status".into(), status(&span.status));
        object.insert("attributes".into(), attributes(&span.attributes));

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "offset_us": micros_between(span.start_time, event.timestamp),
                    "attributes": attributes(&event.attributes),
                })
            })
            .collect();
        object.insert("events".into(), JsonValue::Array(events));

        JsonValue::Object(object)
    }
}

fn unix_nanos(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map_or(0, |d| u64::try_from(d.as_nanos()).unwrap_or(u64::MAX))
}

fn micros_between(start: SystemTime, end: SystemTime) -> u64 {
    end.duration_since(start)
        .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX))
}

fn status(status: &Status) -> JsonValue {
    match status {
        Status::Unset => json!("unset"),
        Status::Ok => json!("ok"),
        Status::Error { description } => json!({ "error": description.to_string() }),
    }
}

fn attributes(attributes: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = attributes
        .iter()
        .map(|kv| (kv.key.to_string(), value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(array) => array_value(array),
    }
}

#[allow(unreachable_patterns)]
fn array_value(array: &Array) -> JsonValue {
    match array {
        Array::Bool(items) => json!(items),
        Array::I64(items) => json!(items),
        Array::F64(items) => json!(items),
        Array::String(items) => JsonValue::Array(items.iter().map(|s| json!(s.as_str())).collect()),
        other => json!(format!("{other:?}")),
    }
}
