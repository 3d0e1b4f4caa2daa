//! `kill` built-in: sends a signal to a job or raw pid.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;
use nix::sys::signal::Signal;
use nix::unistd::Pid;
use std::str::FromStr;

/// `kill [-SIGNAL] %job|pid`. Defaults to `SIGTERM`. Accepts a job operand
/// (`%1`) or a raw pid.
pub fn kill<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let mut signal = Signal::SIGTERM;
    let mut rest = &args[1..];

    if let Some(first) = rest.first() {
        if let Some(spec) = first.strip_prefix('-') {
            match parse_signal(spec) {
                Some(sig) => {
                    signal = sig;
                    rest = &rest[1..];
                }
                None => {
                    eprintln!("kill: {spec}: invalid signal specification");
                    return 1;
                }
            }
        }
    }

    let Some(target) = rest.first() else {
        eprintln!("kill: usage: kill [-signal] pid|%job");
        return 2;
    };

    let pid = if let Some(jobspec) = target.strip_prefix('%') {
        match jobspec.parse::<u32>().ok().and_then(|n| env.jobs.get(aisha_env::JobId(n))) {
            Some(job) => job.pid,
            None => {
                eprintln!("kill: {target}: no such job");
                return 1;
            }
        }
    } else {
        match target.parse::<i32>() {
            Ok(raw) => Pid::from_raw(raw),
            Err(_) => {
                eprintln!("kill: {target}: arguments must be process or job IDs");
                return 1;
            }
        }
    };

    match env.system.kill(pid, signal) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("kill: {e}");
            1
        }
    }
}

fn parse_signal(spec: &str) -> Option<Signal> {
    if let Ok(number) = spec.parse::<i32>() {
        return Signal::try_from(number).ok();
    }
    let named = if spec.starts_with("SIG") {
        spec.to_string()
    } else {
        format!("SIG{spec}")
    };
    Signal::from_str(&named).ok()
}
