//! `jobs` built-in: lists tracked background/stopped jobs.

use aisha_env::{Env, JobStatus, System};
use aisha_semantics::builtin::BuiltinTable;

/// `jobs`: prints every tracked job in insertion order as
/// `[id]  Status  command`.
pub fn jobs<S: System>(env: &mut Env<S>, _args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    for job in env.jobs.iter() {
        let status = match job.status {
            JobStatus::Running => "Running",
            JobStatus::Stopped => "Stopped",
            JobStatus::Done(_) => "Done",
        };
        println!("{}  {status}  {}", job.id.bracketed(), job.command);
    }
    0
}
