//! Errors raised while tokenizing or validating a line.

use crate::location::Location;
use thiserror::Error;

/// Errors raised by the [tokenizer](crate::lex).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TokenizerError {
    #[error("unterminated quote at byte {0:?}")]
    UnterminatedQuote(Location),
    #[error("word exceeds the maximum token length at byte {0:?}")]
    WordTooLong(Location),
    #[error("line exceeds the maximum number of tokens")]
    TooManyTokens,
}

/// Errors raised by the [grammar validator](crate::parser::validate).
///
/// Every variant is surfaced to the user with the same fixed message
/// (`"Invalid Syntax!"`, see [`SyntaxError`]'s `Display` impl); the variant
/// itself exists so tests can assert on *why* a line was rejected without
/// parsing the message text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SyntaxErrorKind {
    LeadingOperator,
    RepeatedOperator,
    PipeWithoutRightHandSide,
    RedirectionWithoutTarget,
    UnmatchedParenthesis,
    TrailingTokens,
}

#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("Invalid Syntax!")]
pub struct SyntaxError {
    pub kind: SyntaxErrorKind,
    pub location: Location,
}

impl SyntaxError {
    #[must_use]
    pub fn new(kind: SyntaxErrorKind, location: Location) -> Self {
        SyntaxError { kind, location }
    }
}

/// A redirection target named in the line refers to a file that cannot be
/// opened in the mode the redirection requires (spec.md §4.4 pre-flight
/// check, §7 `RedirectionError`).
#[derive(Debug, Error)]
#[error("{action} `{file}`: {source}")]
pub struct RedirectionError {
    pub file: String,
    pub action: &'static str,
    #[source]
    pub source: std::io::Error,
}

/// Combined error type returned by [`crate::parser::parse_line`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Tokenizer(#[from] TokenizerError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Redirection(#[from] RedirectionError),
}
