//! `history` built-in: lists the history ring (spec.md §3 "History ring").
//!
//! `!N` re-execution is handled by the main loop (spec.md §9: "`!N`
//! re-parses the original line through the full expansion pipeline
//! fresh"), since it needs the parser and executor, not just this table.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `history`: prints every entry, oldest first, one-indexed.
pub fn history<S: System>(env: &mut Env<S>, _args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let entries: Vec<&str> = env.history.iter().collect();
    for (index, line) in entries.iter().enumerate() {
        println!("{:5}  {line}", index + 1);
    }
    0
}
