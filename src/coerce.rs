use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::{RawValue, WITHHELD};

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}$").unwrap()
});

/// Scalar/list coercion. Never fails: anything that cannot become a string
/// is dropped.
pub fn coerce_to_string_list(value: Option<&RawValue>) -> Vec<String> {
    match value {
        None | Some(RawValue::Null) => Vec::new(),
        Some(RawValue::Text(text)) if text == WITHHELD => Vec::new(),
        Some(RawValue::Text(text)) => vec![text.clone()],
        Some(RawValue::Timestamp(ts)) => vec![ts.isoformat()],
        Some(RawValue::List(items)) => items.iter().filter_map(list_item_as_string).collect(),
    }
}

/// Temporal coercion. Only values that really are timestamps survive.
pub fn coerce_to_timestamp_list(value: Option<&RawValue>) -> Vec<String> {
    match value {
        Some(RawValue::Timestamp(ts)) => vec![ts.isoformat()],
        Some(RawValue::List(items)) => items
            .iter()
            .filter_map(|item| match item {
                RawValue::Timestamp(ts) => Some(ts.isoformat()),
                other => {
                    tracing::debug!(value = ?other, "dropping non-timestamp date entry");
                    None
                }
            })
            .collect(),
        Some(RawValue::Text(text)) => {
            tracing::debug!(value = %text, "date field holds text, treating as empty");
            Vec::new()
        }
        None | Some(RawValue::Null) => Vec::new(),
    }
}

/// Flattens a descriptive field to a single string. Null stays null.
pub fn render_descriptive(value: &RawValue) -> Option<String> {
    match value {
        RawValue::Null => None,
        RawValue::Text(text) => Some(text.clone()),
        RawValue::Timestamp(ts) => Some(ts.isoformat()),
        RawValue::List(items) => Some(
            items
                .iter()
                .filter_map(list_item_as_string)
                .collect::<Vec<_>>()
                .join(" "),
        ),
    }
}

pub fn is_valid_email(candidate: &str) -> bool {
    EMAIL_REGEX.is_match(candidate)
}

fn list_item_as_string(item: &RawValue) -> Option<String> {
    match item {
        RawValue::Text(text) => Some(text.clone()),
        RawValue::Timestamp(ts) => Some(ts.isoformat()),
        RawValue::Null | RawValue::List(_) => None,
    }
}
