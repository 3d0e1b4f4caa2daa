//! Built-in commands that affect execution state (spec.md §1: `cd`, `exit`,
//! `source`, `fg`/`bg`, `jobs`, `kill`, `export`, `alias`, `history`) plus
//! the `test`/`[` built-in spec.md's Non-goals carve out as the one
//! conditional-logic surface this shell keeps.
//!
//! Each function matches [`aisha_semantics::builtin::Builtin`]'s shape and
//! is meant to be registered in a [`BuiltinTable`](aisha_semantics::builtin::BuiltinTable)
//! built by `aisha-cli`, the way `yash-builtin`'s `Builtin` constants are
//! assembled into `yash_cli`'s default built-in set outside this crate.

pub mod alias;
pub mod bg;
pub mod cd;
pub mod common;
pub mod exit;
pub mod export;
pub mod fg;
pub mod history;
pub mod jobs;
pub mod kill;
pub mod source;
pub mod test;

use aisha_env::System;
use aisha_semantics::builtin::BuiltinTable;

/// Builds the default table mapping every built-in name to its
/// implementation, for `aisha-cli` to hand to the executor.
#[must_use]
pub fn default_table<S: System>() -> BuiltinTable<S> {
    let mut table: BuiltinTable<S> = BuiltinTable::new();
    table.insert("cd", cd::cd);
    table.insert("exit", exit::exit);
    table.insert("source", source::source);
    table.insert(".", source::source);
    table.insert("fg", fg::fg);
    table.insert("bg", bg::bg);
    table.insert("jobs", jobs::jobs);
    table.insert("kill", kill::kill);
    table.insert("export", export::export);
    table.insert("alias", alias::alias);
    table.insert("unalias", alias::unalias);
    table.insert("history", history::history);
    table.insert("test", test::test);
    table.insert("[", test::bracket);
    table
}
