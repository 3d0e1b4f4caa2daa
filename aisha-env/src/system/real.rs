//! The production [`System`] implementation, backed directly by `nix` and
//! `libc`, grounded on `yash_env::system::real::RealSystem`'s shape (one
//! struct, no fields, every method a thin syscall wrapper) but without its
//! process-group/terminal-control bookkeeping, which this shell's
//! single-tracked-pid job model (spec.md §3) does not need.

use super::{OpenSpec, System};
use nix::fcntl::OFlag;
use nix::sys::signal::{self, Signal};
use nix::sys::stat::Mode;
use nix::sys::wait::{waitpid, WaitPidFlag, WaitStatus};
use nix::unistd::{self, Pid};
use std::ffi::CString;
use std::os::unix::io::RawFd;

/// The real operating system, as seen through [`System`].
#[derive(Debug, Default)]
pub struct RealSystem;

impl System for RealSystem {
    fn pipe(&mut self) -> nix::Result<(RawFd, RawFd)> {
        let (r, w) = unistd::pipe()?;
        log::trace!("pipe: read={r:?} write={w:?}");
        use std::os::fd::IntoRawFd;
        Ok((r.into_raw_fd(), w.into_raw_fd()))
    }

    fn dup2(&mut self, src: RawFd, dst: RawFd) -> nix::Result<()> {
        use std::os::fd::{AsRawFd, BorrowedFd};
        // SAFETY: `src`/`dst` are valid open descriptors owned by the
        // caller for the lifetime of this call.
        let src = unsafe { BorrowedFd::borrow_raw(src) };
        unistd::dup2(src.as_raw_fd(), dst)?;
        Ok(())
    }

    fn dup(&mut self, fd: RawFd) -> nix::Result<RawFd> {
        use std::os::fd::{AsRawFd, BorrowedFd, IntoRawFd};
        // SAFETY: `fd` is a valid open descriptor owned by the caller for the
        // duration of this call; `dup` does not take ownership of it.
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
        let owned = unistd::dup(borrowed.as_raw_fd())?;
        Ok(owned.into_raw_fd())
    }

    fn close(&mut self, fd: RawFd) -> nix::Result<()> {
        use std::os::fd::{FromRawFd, OwnedFd};
        // SAFETY: caller transfers ownership of `fd` to this call exactly
        // once; aisha-semantics never closes a descriptor it does not own.
        let owned = unsafe { OwnedFd::from_raw_fd(fd) };
        drop(owned);
        Ok(())
    }

    fn open_for_redirection(&mut self, path: &str, spec: OpenSpec) -> nix::Result<RawFd> {
        let (oflag, mode) = match spec {
            OpenSpec::Truncate => (
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_TRUNC,
                Mode::from_bits_truncate(0o644),
            ),
            OpenSpec::Append => (
                OFlag::O_WRONLY | OFlag::O_CREAT | OFlag::O_APPEND,
                Mode::from_bits_truncate(0o644),
            ),
            OpenSpec::ReadOnly => (OFlag::O_RDONLY, Mode::empty()),
        };
        let fd = nix::fcntl::open(path, oflag, mode)?;
        log::debug!("open {path} ({spec:?}) -> {fd:?}");
        use std::os::fd::IntoRawFd;
        Ok(fd.into_raw_fd())
    }

    fn fork(&mut self) -> nix::Result<Option<Pid>> {
        // SAFETY: called only before any additional threads are spawned;
        // the child immediately either `execve`s or `_exit`s, performing no
        // allocation-unsafe work in between beyond what this module does.
        match unsafe { unistd::fork()? } {
            unistd::ForkResult::Parent { child } => {
                log::debug!("forked child {child}");
                Ok(Some(child))
            }
            unistd::ForkResult::Child => Ok(None),
        }
    }

    fn execve(&mut self, path: &CString, args: &[CString], envp: &[CString]) -> nix::Result<()> {
        log::debug!("execve {path:?}");
        match unistd::execve(path, args, envp) {
            Ok(infallible) => match infallible {},
            Err(errno) => Err(errno),
        }
    }

    fn wait(&mut self, pid: Pid) -> nix::Result<WaitStatus> {
        waitpid(pid, Some(WaitPidFlag::WUNTRACED))
    }

    fn poll(&mut self, pid: Pid) -> nix::Result<Option<WaitStatus>> {
        let flags = WaitPidFlag::WNOHANG | WaitPidFlag::WUNTRACED | WaitPidFlag::WCONTINUED;
        match waitpid(pid, Some(flags))? {
            WaitStatus::StillAlive => Ok(None),
            status => Ok(Some(status)),
        }
    }

    fn kill(&mut self, pid: Pid, sig: Signal) -> nix::Result<()> {
        signal::kill(pid, sig)
    }

    fn chdir(&mut self, path: &str) -> nix::Result<()> {
        unistd::chdir(path)
    }

    fn getcwd(&mut self) -> nix::Result<String> {
        let cwd = unistd::getcwd().map_err(|_| nix::Error::ENOENT)?;
        Ok(cwd.to_string_lossy().into_owned())
    }

    fn isatty(&self, fd: RawFd) -> bool {
        unistd::isatty(fd).unwrap_or(false)
    }

    fn exit_immediately(&mut self, status: i32) -> ! {
        // SAFETY: invoked only in a forked child right before process
        // termination, after all parent-side state has already diverged.
        unsafe { libc::_exit(status) }
    }
}
