use chrono::{DateTime, NaiveDateTime};
use serde_json::{Map, Value};

use crate::record::{DATE_FIELDS, RawLookupResult, RawValue, Timestamp};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%:z"];

pub(crate) fn lookup_result_from_object(object: Map<String, Value>) -> RawLookupResult {
    object
        .into_iter()
        .map(|(key, value)| {
            let temporal = DATE_FIELDS.contains(&key.as_str());
            let raw = convert(value, temporal);
            (key, raw)
        })
        .collect()
}

fn convert(value: Value, temporal: bool) -> RawValue {
    match value {
        Value::Null => RawValue::Null,
        Value::String(text) if temporal => match parse_timestamp(&text) {
            Some(ts) => RawValue::Timestamp(ts),
            None => RawValue::Text(text),
        },
        Value::String(text) => RawValue::Text(text),
        Value::Bool(_) | Value::Number(_) => RawValue::Text(value.to_string()),
        Value::Array(items) => {
            RawValue::List(items.into_iter().map(|v| convert(v, temporal)).collect())
        }
        Value::Object(_) => {
            tracing::debug!("nested object in lookup result, treating as null");
            RawValue::Null
        }
    }
}

fn parse_timestamp(text: &str) -> Option<Timestamp> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(Timestamp::Offset(dt));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, fmt) {
            return Some(Timestamp::Offset(dt));
        }
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(Timestamp::Naive)
}
