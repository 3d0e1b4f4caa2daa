//! The expansion pipeline (spec.md §4.3).
//!
//! Two ordered passes run on the raw line before tokenization (alias, then
//! variable); glob expansion runs afterward, per [`Word`](aisha_syntax::TokenKind::Word)
//! token (spec.md §5 "Ordering guarantees": "Alias and variable expansion
//! happen before tokenization... Glob expansion... happen before any
//! process is spawned").

pub mod alias;
pub mod glob;
pub mod variable;

use aisha_env::{Env, System};

/// Runs the alias pass then the variable pass over one raw input line.
#[must_use]
pub fn expand_line<S: System>(line: &str, env: &mut Env<S>) -> String {
    let after_alias = alias::expand_line(line, &env.aliases);
    variable::expand_line(&after_alias, env)
}
