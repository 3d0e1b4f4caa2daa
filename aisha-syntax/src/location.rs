//! Source locations within a single input line.
//!
//! Unlike yash-rs's [`Location`](https://docs.rs/yash-syntax/latest/yash_syntax/source/struct.Location.html),
//! which tracks positions across a graph of nested sources (files, aliases,
//! `eval` strings), aisha only ever tokenizes one expanded line at a time, so
//! a flat byte offset into that line is enough to point a diagnostic at the
//! offending text.

/// Byte offset into the line currently being tokenized.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Location(pub usize);

impl Location {
    #[must_use]
    pub fn at(offset: usize) -> Self {
        Location(offset)
    }
}

impl From<usize> for Location {
    fn from(offset: usize) -> Self {
        Location(offset)
    }
}
