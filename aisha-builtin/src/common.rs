//! Shared helpers for the job-control built-ins (`fg`, `bg`, `kill`),
//! grounded on `yash-builtin/src/common.rs`'s role as the place built-ins
//! share small argument-parsing utilities rather than duplicating them.

use aisha_env::{Env, JobId, System};

/// Parses a job-control operand (`%3`, bare `3`, or `%%`/`%+` for "most
/// recent") into a [`JobId`], falling back to the most recently started job
/// when no operand is given at all.
pub fn resolve_job_id<S: System>(env: &Env<S>, operand: Option<&str>) -> Option<JobId> {
    match operand {
        None | Some("%%") | Some("%+") => env.jobs.most_recent().map(|job| job.id),
        Some(spec) => {
            let digits = spec.strip_prefix('%').unwrap_or(spec);
            digits.parse::<u32>().ok().map(JobId)
        }
    }
}
