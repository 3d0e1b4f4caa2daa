//! Job table reaping and foreground/background transitions (spec.md §4.6).

use aisha_env::{Env, Error, JobId, JobStatus, Result, System};
use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;

/// One state-change notice produced by [`drain`], for the caller to render
/// to the user at the next prompt (spec.md §4.6: "State transitions are
/// announced to the user").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JobNotice {
    Exited(JobId, i32),
    Signaled(JobId, i32),
    Stopped(JobId),
    Continued(JobId),
}

/// Non-blocking poll of every tracked job, removing those that reached a
/// terminal state (spec.md §4.6: "Just before displaying each prompt the
/// main loop performs a non-blocking drain of the job table").
pub fn drain<S: System>(env: &mut Env<S>) -> Vec<JobNotice> {
    let mut notices = Vec::new();
    let ids: Vec<JobId> = env.jobs.iter().map(|job| job.id).collect();
    for id in ids {
        let Some(pid) = env.jobs.get(id).map(|job| job.pid) else {
            continue;
        };
        match env.system.poll(pid) {
            Ok(Some(WaitStatus::Exited(_, code))) => {
                notices.push(JobNotice::Exited(id, code));
                env.jobs.remove(id);
            }
            Ok(Some(WaitStatus::Signaled(_, signal, _))) => {
                notices.push(JobNotice::Signaled(id, signal as i32));
                env.jobs.remove(id);
            }
            Ok(Some(WaitStatus::Stopped(_, _))) => {
                if let Some(job) = env.jobs.get_mut(id) {
                    job.status = JobStatus::Stopped;
                }
                notices.push(JobNotice::Stopped(id));
            }
            Ok(Some(WaitStatus::Continued(_))) => {
                if let Some(job) = env.jobs.get_mut(id) {
                    job.status = JobStatus::Running;
                }
                notices.push(JobNotice::Continued(id));
            }
            _ => {}
        }
    }
    notices
}

/// `fg <id>`: continues a stopped job if needed, installs it as foreground,
/// removes it from the table, and waits synchronously (spec.md §4.6). If
/// the job stops again, it is reinserted with a fresh [`JobId`].
pub fn foreground<S: System>(env: &mut Env<S>, id: JobId) -> Result<i32> {
    let job = env.jobs.get(id).cloned().ok_or(Error::NoSuchJob)?;
    if job.status == JobStatus::Stopped {
        env.system.kill(job.pid, Signal::SIGCONT)?;
    }
    env.jobs.remove(id);
    aisha_env::signal::set_foreground(job.pid);
    let status = env.system.wait(job.pid)?;
    aisha_env::signal::clear_foreground();

    match status {
        WaitStatus::Exited(_, code) => {
            env.exit_status = code;
            Ok(code)
        }
        WaitStatus::Signaled(_, signal, _) => {
            let code = 128 + signal as i32;
            env.exit_status = code;
            Ok(code)
        }
        WaitStatus::Stopped(pid, _) => {
            env.jobs.insert(pid, job.command, JobStatus::Stopped);
            env.exit_status = 148;
            Ok(148)
        }
        _ => Ok(env.exit_status),
    }
}

/// `bg <id>`: sends `SIGCONT` and flips the job's status to `Running`
/// without waiting (spec.md §4.6).
pub fn background<S: System>(env: &mut Env<S>, id: JobId) -> Result<()> {
    let job = env.jobs.get(id).cloned().ok_or(Error::NoSuchJob)?;
    env.system.kill(job.pid, Signal::SIGCONT)?;
    if let Some(job) = env.jobs.get_mut(id) {
        job.status = JobStatus::Running;
    }
    Ok(())
}
