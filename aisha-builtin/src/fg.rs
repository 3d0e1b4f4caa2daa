//! `fg` built-in.

use crate::common::resolve_job_id;
use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `fg [%job]`: continues a stopped job if needed, brings it to the
/// foreground, and waits for it synchronously (spec.md §4.6).
pub fn fg<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let Some(id) = resolve_job_id(env, args.get(1).map(String::as_str)) else {
        eprintln!("fg: no such job");
        return 1;
    };
    if let Some(job) = env.jobs.get(id) {
        println!("{}", job.command);
    }
    match aisha_semantics::job_control::foreground(env, id) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("fg: {e}");
            1
        }
    }
}
