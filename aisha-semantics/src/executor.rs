//! The executor (spec.md §4.5): dispatches a validated [`List`] to
//! processes.
//!
//! Kept as three cooperating modules, the way `yash-semantics` splits
//! `command`, `command_impl`, and `pipeline`: [`command`] runs one
//! [`Command`] (simple or subshell), [`pipeline`] wires up a
//! [`Pipeline`]'s N stages, and this module folds [`List`]s and
//! [`AndOrList`]s, applying short-circuit and background semantics.

pub mod background;
pub mod command;
pub mod pipeline;

use crate::builtin::BuiltinTable;
use aisha_env::System;
use aisha_syntax::{AndOrList, AndOrOp, List};

/// Runs every item of `list` in order, honoring each item's background flag
/// (spec.md §4.5 "Background segment"). Returns the exit status of the last
/// item actually run in the foreground (background items do not affect
/// `$?`; spec.md: the background fork "returns success immediately without
/// waiting"). `source` is the raw input line, carried through only so a
/// newly registered job can record the text the user actually typed
/// (spec.md §3 "Job table": jobs are displayed with their source command).
pub fn run_list<S: System>(
    env: &mut aisha_env::Env<S>,
    builtins: &BuiltinTable<S>,
    list: &List,
    source: &str,
) -> i32 {
    let mut status = env.exit_status;
    for item in &list.items {
        if item.background {
            background::spawn(env, builtins, &item.and_or, source);
            status = 0;
        } else {
            status = run_and_or(env, builtins, &item.and_or, source);
        }
        env.exit_status = status;
    }
    status
}

/// Evaluates an `&&`/`||` chain left to right, short-circuiting per spec.md
/// §4.5 "And-or list".
pub fn run_and_or<S: System>(
    env: &mut aisha_env::Env<S>,
    builtins: &BuiltinTable<S>,
    and_or: &AndOrList,
    source: &str,
) -> i32 {
    let mut status = pipeline::run(env, builtins, &and_or.first, source);
    for (op, pipeline) in &and_or.rest {
        let should_run = match op {
            AndOrOp::And => status == 0,
            AndOrOp::Or => status != 0,
        };
        if !should_run {
            continue;
        }
        status = pipeline::run(env, builtins, pipeline, source);
    }
    status
}
