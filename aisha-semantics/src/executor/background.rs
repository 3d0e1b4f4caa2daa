//! Launching a background segment (spec.md §4.5 "Background segment", `&`).
//!
//! A background segment runs under a single supervisor process so the shell
//! only ever needs to track one pid per job, matching spec.md §3's job
//! table ("only the shell-visible last-stage process is tracked"), even
//! when the segment is itself a pipeline or and-or chain with several
//! stages underneath.

use crate::builtin::BuiltinTable;
use aisha_env::{Env, JobStatus, OpenSpec, System};
use aisha_syntax::AndOrList;

/// Forks a supervisor that runs `and_or` to completion and exits with its
/// status, registers the supervisor as a `Running` job, updates `$!`, and
/// prints `[job-id] pid` (spec.md §4.6: "Starting a background job ...
/// prints its job number and pid"). Returns immediately without waiting.
pub fn spawn<S: System>(env: &mut Env<S>, builtins: &BuiltinTable<S>, and_or: &AndOrList, source: &str) {
    match env.system.fork() {
        Ok(None) => run_supervisor(env, builtins, and_or, source),
        Ok(Some(child)) => {
            let id = env.jobs.insert(child, source.to_owned(), JobStatus::Running);
            env.last_background_pid = Some(child);
            println!("{} {child}", id.bracketed());
        }
        Err(e) => eprintln!("fork: {e}"),
    }
}

/// Runs entirely inside the forked supervisor: detaches standard input from
/// the terminal (spec.md §4.5: a background job "reads from `/dev/null` by
/// default rather than the terminal"), resets signal dispositions, runs the
/// segment, and exits with its result. Never returns.
fn run_supervisor<S: System>(env: &mut Env<S>, builtins: &BuiltinTable<S>, and_or: &AndOrList, source: &str) -> ! {
    if aisha_env::signal::reset_to_default().is_err() {
        env.system.exit_immediately(1);
    }
    if let Ok(fd) = env.system.open_for_redirection("/dev/null", OpenSpec::ReadOnly) {
        let _ = env.system.dup2(fd, 0);
        let _ = env.system.close(fd);
    }
    let status = crate::executor::run_and_or(env, builtins, and_or, source);
    env.system.exit_immediately(status);
}
