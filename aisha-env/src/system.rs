//! The OS-interface seam (spec.md §4.5 "Executor" / §6 "External
//! interfaces"), modeled on `yash_env::system::System`: a trait narrow
//! enough that `aisha-semantics` can be exercised without forking a real
//! process, with one production implementation.
//!
//! Unlike the teacher's `System`, this trait has no process-group /
//! `tcsetpgrp` surface: spec.md tracks only the last stage of a pipeline
//! as a job (§3), so there is never more than one process this shell
//! itself needs to foreground.

use nix::sys::signal::Signal;
use nix::sys::wait::WaitStatus;
use nix::unistd::Pid;
use std::ffi::CString;
use std::os::unix::io::RawFd;

pub mod real;

pub use real::RealSystem;

/// The raw, blocking operating-system operations the executor needs.
/// Every method maps to exactly one syscall family, the same
/// one-trait-method-per-syscall granularity `yash_env::system::System`
/// uses.
pub trait System {
    /// `pipe(2)`: returns `(read_fd, write_fd)`.
    fn pipe(&mut self) -> nix::Result<(RawFd, RawFd)>;

    /// `dup2(2)`.
    fn dup2(&mut self, src: RawFd, dst: RawFd) -> nix::Result<()>;

    /// `dup(2)`: used to save a standard descriptor aside before a
    /// synchronously-run built-in installs its redirections onto it, so it
    /// can be restored afterward (spec.md §4.5).
    fn dup(&mut self, fd: RawFd) -> nix::Result<RawFd>;

    /// `close(2)`.
    fn close(&mut self, fd: RawFd) -> nix::Result<()>;

    /// `open(2)` for a redirection target, returning the new descriptor.
    fn open_for_redirection(&mut self, path: &str, spec: OpenSpec) -> nix::Result<RawFd>;

    /// `fork(2)`. Returns `None` in the child.
    fn fork(&mut self) -> nix::Result<Option<Pid>>;

    /// `execve(2)`; never returns on success.
    fn execve(&mut self, path: &CString, args: &[CString], envp: &[CString]) -> nix::Result<()>;

    /// `waitpid(2)` for a specific pid, blocking until it exits or stops
    /// (`WUNTRACED`). Used for the foreground wait (spec.md §4.5, §5
    /// "Suspension points").
    fn wait(&mut self, pid: Pid) -> nix::Result<WaitStatus>;

    /// `waitpid(2)` for a specific pid with `WNOHANG|WUNTRACED|WCONTINUED`,
    /// returning immediately. `Ok(None)` means no state change is pending.
    /// Used by the job table's non-blocking drain (spec.md §4.6) and by
    /// pipeline reaping of non-foreground stages.
    fn poll(&mut self, pid: Pid) -> nix::Result<Option<WaitStatus>>;

    /// `kill(2)`: sends `signal` to `pid`. Used by `fg`/`bg` to send
    /// `SIGCONT` and by the `kill` built-in to send an arbitrary signal.
    fn kill(&mut self, pid: Pid, signal: Signal) -> nix::Result<()>;

    /// `chdir(2)`.
    fn chdir(&mut self, path: &str) -> nix::Result<()>;

    /// `getcwd(2)`.
    fn getcwd(&mut self) -> nix::Result<String>;

    /// Whether file descriptor `fd` is connected to a terminal
    /// (`isatty(3)`).
    fn isatty(&self, fd: RawFd) -> bool;

    /// `_exit(2)`: terminates the current process immediately, used only
    /// in the forked child after `execve` has failed.
    fn exit_immediately(&mut self, status: i32) -> !;
}

/// How a redirection target should be opened, per spec.md §4.2's
/// redirection-operator table (`>`, `>>`, `<`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OpenSpec {
    /// `>`: truncate-or-create, write-only.
    Truncate,
    /// `>>`: append-or-create, write-only.
    Append,
    /// `<`: read-only, must already exist.
    ReadOnly,
}
