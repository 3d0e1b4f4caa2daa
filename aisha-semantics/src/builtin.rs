//! The seam between the executor and concrete built-in command bodies.
//!
//! spec.md §1 keeps "the concrete built-in command bodies apart from those
//! that affect execution state" out of this core's scope, so this crate
//! never names `cd`, `exit`, and the rest directly: it only defines the
//! narrow [`Builtin`] function shape and [`BuiltinTable`] lookup map.
//! `aisha-builtin` implements the bodies against this seam; `aisha-cli`
//! assembles the table and hands it to the executor, mirroring how
//! `yash_env::Env::builtins` is populated from outside `yash_semantics`.

use aisha_env::{Env, System};
use std::collections::HashMap;

/// One built-in's implementation: given the environment, its argument
/// vector (`args[0]` is the command name itself, as `argv[0]` would be),
/// and the full built-in table, returns the exit status spec.md §6
/// prescribes for it. The table is threaded in so `source` can dispatch
/// the lines it reads back through the same built-ins.
pub type Builtin<S> = fn(&mut Env<S>, &[String], &BuiltinTable<S>) -> i32;

/// The set of built-ins the executor consults before falling back to an
/// external program (spec.md §4.5).
pub type BuiltinTable<S> = HashMap<&'static str, Builtin<S>>;
