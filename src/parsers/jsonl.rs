use memchr::memchr_iter;
use serde_json::Value;

use super::value::lookup_result_from_object;
use crate::record::RawLookupResult;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Inputs above this size are split and decoded in parallel.
#[cfg(feature = "parallel")]
const CHUNK_BYTES: usize = 4 * 1024 * 1024;

pub fn parse_jsonl(input: &str) -> Vec<RawLookupResult> {
    #[cfg(feature = "parallel")]
    {
        if input.len() > CHUNK_BYTES {
            return parse_parallel(input);
        }
    }

    let mut out = Vec::new();
    parse_chunk_into_vec(input, &mut out);
    out
}

#[cfg(feature = "parallel")]
fn parse_parallel(input: &str) -> Vec<RawLookupResult> {
    let bytes = input.as_bytes();
    let len = bytes.len();

    // newline-aligned ranges, so every range is valid UTF-8 on its own
    let mut ranges = Vec::new();
    let mut start = 0usize;
    while start < len {
        let mut end = (start + CHUNK_BYTES).min(len);
        if end < len {
            end = memchr::memchr(b'\n', &bytes[end..])
                .map(|offset| end + offset + 1)
                .unwrap_or(len);
        }
        ranges.push(start..end);
        start = end;
    }

    let parts: Vec<Vec<RawLookupResult>> = ranges
        .into_par_iter()
        .map(|r| {
            let mut out = Vec::new();
            parse_chunk_into_vec(&input[r], &mut out);
            out
        })
        .collect();

    parts.into_iter().flatten().collect()
}

fn parse_chunk_into_vec(chunk: &str, out: &mut Vec<RawLookupResult>) {
    for (index, line) in chunk.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(line) {
            Ok(Value::Object(object)) => out.push(lookup_result_from_object(object)),
            Ok(_) => tracing::warn!(line = index + 1, "skipping non-object JSON line"),
            Err(err) => tracing::warn!(line = index + 1, error = %err, "skipping malformed JSON line"),
        }
    }
}

/// Cuts `bytes` after every `batch_size`-th newline.
pub fn split_batches(bytes: &[u8], batch_size: usize) -> Vec<&[u8]> {
    let batch_size = batch_size.max(1);
    let mut batches = Vec::new();
    let mut start = 0usize;
    for (count, nl) in memchr_iter(b'\n', bytes).enumerate() {
        if (count + 1) % batch_size == 0 {
            batches.push(&bytes[start..=nl]);
            start = nl + 1;
        }
    }
    if start < bytes.len() {
        batches.push(&bytes[start..]);
    }
    batches
}
