//! `bg` built-in.

use crate::common::resolve_job_id;
use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `bg [%job]`: resumes a stopped job in the background (spec.md §4.6).
pub fn bg<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let Some(id) = resolve_job_id(env, args.get(1).map(String::as_str)) else {
        eprintln!("bg: no such job");
        return 1;
    };
    match aisha_semantics::job_control::background(env, id) {
        Ok(()) => {
            if let Some(job) = env.jobs.get(id) {
                println!("{} {}", job.id.bracketed(), job.command);
            }
            0
        }
        Err(e) => {
            eprintln!("bg: {e}");
            1
        }
    }
}
