//! The error taxonomy shared across the execution engine (spec.md §7).

use thiserror::Error;

/// Errors that can arise from interaction with the operating system or from
/// job-table/variable-store misuse. Each variant corresponds to one row of
/// spec.md §7's taxonomy table; `SyntaxError`/`RedirectionError` raised
/// during parsing live in `aisha_syntax::error` instead, since they never
/// reach this far.
#[derive(Debug, Error)]
pub enum Error {
    #[error("fork: {0}")]
    Spawn(#[source] nix::Error),

    #[error("{0}: command not found")]
    CommandNotFound(String),

    #[error(transparent)]
    System(#[from] nix::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("no such job")]
    NoSuchJob,

    #[error("job {0} has terminated")]
    JobTerminated(u32),

    #[error("{0}: not a valid identifier")]
    InvalidIdentifier(String),

    #[error("{0}: readonly variable")]
    ReadOnlyVariable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
