use thiserror::Error;

/// Errors raised while parsing a glob pattern.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PatternError {
    #[error("invalid character class in bracket expression")]
    InvalidClass,
    #[error("pattern failed to compile as a regular expression: {0}")]
    Regex(String),
}
