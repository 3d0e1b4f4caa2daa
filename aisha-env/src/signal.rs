//! Signal dispatch (spec.md §4.6 "Signal dispatcher").
//!
//! The shell installs handlers for `SIGINT` and `SIGTSTP` that forward the
//! signal to whichever process is currently in the foreground, and ignores
//! `SIGQUIT` outright, so that `Ctrl-C`/`Ctrl-Z` at the prompt never kill
//! the shell itself. Modeled on `yash_env::signal`'s handler-registration
//! shape, reduced to the one foreground-pid forwarding rule spec.md names
//! rather than yash's full trap/condition table.

use nix::sys::signal::{self, SaFlags, SigAction, SigHandler, SigSet, Signal};
use nix::unistd::Pid;
use std::sync::atomic::{AtomicI32, Ordering};

/// Sentinel meaning "no foreground job": the shell itself is the only
/// process that should receive the next `SIGINT`/`SIGTSTP`, i.e. none,
/// since the shell ignores both at the top-level prompt.
const NO_FOREGROUND: i32 = -1;

static FOREGROUND_PID: AtomicI32 = AtomicI32::new(NO_FOREGROUND);

/// Records `pid` as the process group leader that should receive
/// `SIGINT`/`SIGTSTP` forwarded from the shell's own handler, for the
/// duration of running it in the foreground.
pub fn set_foreground(pid: Pid) {
    FOREGROUND_PID.store(pid.as_raw(), Ordering::SeqCst);
}

/// Clears the foreground process, restoring the "signals stop at the
/// shell" state once the foreground job exits or is stopped.
pub fn clear_foreground() {
    FOREGROUND_PID.store(NO_FOREGROUND, Ordering::SeqCst);
}

#[must_use]
pub fn foreground() -> Option<Pid> {
    let raw = FOREGROUND_PID.load(Ordering::SeqCst);
    (raw != NO_FOREGROUND).then(|| Pid::from_raw(raw))
}

extern "C" fn forward_to_foreground(signum: libc::c_int) {
    let raw = FOREGROUND_PID.load(Ordering::SeqCst);
    if raw != NO_FOREGROUND {
        // SAFETY: `kill` is async-signal-safe; `raw` was stored by
        // `set_foreground` as a real pid.
        unsafe {
            libc::kill(raw, signum);
        }
    }
}

/// Installs the shell's signal handlers: `SIGINT`/`SIGTSTP` forward to the
/// foreground job (or are swallowed if there is none), `SIGQUIT` is
/// ignored unconditionally, mirroring common interactive-shell behavior
/// that the teacher's own `yash_env::signal` module documents handlers
/// for.
///
/// # Errors
/// Returns the underlying `nix::Error` if `sigaction` fails.
pub fn install() -> nix::Result<()> {
    let forward = SigAction::new(
        SigHandler::Handler(forward_to_foreground),
        SaFlags::SA_RESTART,
        SigSet::empty(),
    );
    // SAFETY: `forward_to_foreground` only calls the async-signal-safe
    // `kill(2)`.
    unsafe {
        signal::sigaction(Signal::SIGINT, &forward)?;
        signal::sigaction(Signal::SIGTSTP, &forward)?;
        signal::sigaction(Signal::SIGQUIT, &SigAction::new(
            SigHandler::SigIgn,
            SaFlags::empty(),
            SigSet::empty(),
        ))?;
    }
    Ok(())
}

/// Resets `SIGINT`, `SIGTSTP`, and `SIGQUIT` to their default dispositions.
/// Called in a forked child before `execve` (spec.md §4.7: "Children always
/// reset these dispositions to default before exec"), so a program that
/// itself expects to be killed by `Ctrl-C` is not left with the parent's
/// forwarding handler or the ignored `SIGQUIT`.
///
/// # Errors
/// Returns the underlying `nix::Error` if `sigaction` fails.
pub fn reset_to_default() -> nix::Result<()> {
    let default = SigAction::new(SigHandler::SigDfl, SaFlags::empty(), SigSet::empty());
    // SAFETY: `SigDfl` installs the kernel's default disposition, which is
    // always safe to set.
    unsafe {
        signal::sigaction(Signal::SIGINT, &default)?;
        signal::sigaction(Signal::SIGTSTP, &default)?;
        signal::sigaction(Signal::SIGQUIT, &default)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn foreground_round_trips() {
        clear_foreground();
        assert_eq!(foreground(), None);
        set_foreground(Pid::from_raw(4242));
        assert_eq!(foreground(), Some(Pid::from_raw(4242)));
        clear_foreground();
        assert_eq!(foreground(), None);
    }
}
