use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown preset: {0} (expected `jsonl` or `json`)")]
    UnknownPreset(String),
    #[error("input is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON object or an array of objects, found {0}")]
    UnexpectedShape(&'static str),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("batch size must be at least 1")]
    BatchSize,
    #[error("invalid scope regex `{pattern}`: {source}")]
    ScopeRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
