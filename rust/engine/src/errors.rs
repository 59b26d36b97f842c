use thiserror::Error;

/// Fatal failures. Only a log that is not recognizable as the expected export
/// at all aborts a parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Malformed input: required column `{missing}` not found in header row")]
    MalformedInput { missing: String },
    #[error("Malformed input: {0}")]
    Csv(String),
}

/// Non-fatal conditions reported alongside a (possibly empty) result.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseWarning {
    #[error("No hands found in the uploaded file")]
    NoHandsFound,
    #[error("Could not auto-detect hero (hero never showed cards in this log)")]
    HeroUndetermined,
}
