use anyhow::Context as _;
use thiserror::Error;

/// Failures detected while decoding definitions or settings.
///
/// Scoring itself never fails; it logs and falls back to zero.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("unknown club characteristic: {0}")]
    UnknownCharacteristic(String),

    #[error("unknown collation: {0} (expected `es` or `root`)")]
    UnknownCollation(String),

    #[error("invalid value `{value}` for setting {key}")]
    InvalidSetting { key: &'static str, value: String },
}

/// Add context to file read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read input file: {}", path)
}

/// Add context to parse errors
pub fn parse_context(data_type: &str) -> String {
    format!("Failed to parse {}", data_type)
}

/// Wrap result with read context
pub fn with_read_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(read_context(path))
}

/// Wrap result with parse context
pub fn with_parse_context<T, E>(result: Result<T, E>, data_type: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(parse_context(data_type))
}
