pub mod json;
pub mod jsonl;
mod value;

use crate::error::InputError;
use crate::record::RawLookupResult;

pub const PRESETS: [&str; 2] = ["jsonl", "json"];

pub fn parse(preset: &str, input: &str) -> Result<Vec<RawLookupResult>, InputError> {
    match preset {
        "jsonl" => Ok(jsonl::parse_jsonl(input)),
        "json" => json::parse_json(input),
        _ => Err(InputError::UnknownPreset(preset.to_string())),
    }
}

/// Splits raw input into independently parseable slices.
pub fn batches<'a>(
    preset: &str,
    bytes: &'a [u8],
    batch_size: usize,
) -> Result<Vec<&'a [u8]>, InputError> {
    match preset {
        "jsonl" => Ok(jsonl::split_batches(bytes, batch_size)),
        "json" if bytes.is_empty() => Ok(Vec::new()),
        "json" => Ok(vec![bytes]),
        _ => Err(InputError::UnknownPreset(preset.to_string())),
    }
}
