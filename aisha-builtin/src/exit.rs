//! `exit` built-in.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `exit [status]`. Records the requested status on [`Env::exit_requested`]
/// for the main loop to act on after restoring terminal state, rather than
/// terminating the process here directly (spec.md §7: only a top-level
/// end-of-file read or an explicit `exit` terminate the shell).
pub fn exit<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let status = match args.get(1) {
        Some(s) => match s.parse::<i32>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("exit: {s}: numeric argument required");
                2
            }
        },
        None => env.exit_status,
    };
    env.exit_requested = Some(status);
    status
}
