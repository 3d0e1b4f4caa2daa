//! Restricted POSIX-ish glob pattern matching used for pathname expansion.
//!
//! This crate is purely about matching one string against one pattern; the
//! directory walk, hidden-file rule, sort, and "keep the literal pattern on
//! no match" fallback described in spec.md §4.3 live in
//! `aisha-semantics::expansion::glob`, which is the only place that needs a
//! filesystem.

mod error;
mod pattern;

pub use error::PatternError;
pub use pattern::{has_metacharacters, Pattern};
