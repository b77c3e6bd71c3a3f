use serde_json::Value;

use super::value::lookup_result_from_object;
use crate::error::InputError;
use crate::record::RawLookupResult;

/// Accepts a single lookup result object or an array of them.
pub fn parse_json(input: &str) -> Result<Vec<RawLookupResult>, InputError> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    match serde_json::from_str::<Value>(input)? {
        Value::Object(object) => Ok(vec![lookup_result_from_object(object)]),
        Value::Array(items) => Ok(items
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(object) => Some(lookup_result_from_object(object)),
                _ => {
                    tracing::warn!(index, "skipping non-object array element");
                    None
                }
            })
            .collect()),
        other => Err(InputError::UnexpectedShape(kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
