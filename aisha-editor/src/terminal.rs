//! Raw-mode terminal control (spec.md §4.8: "puts the terminal into raw
//! mode... for the duration of input").
//!
//! Modeled on `yash_env::system::terminal`'s trait-seam shape (a narrow
//! trait standing between the editor and the OS) but built directly on
//! `nix::sys::termios`, since the teacher's own terminal module only
//! covers process-group plumbing (`tcgetpgrp`/`tcsetpgrp`) this shell's
//! single-tracked-pid job model does not need.

use nix::sys::termios::{self, LocalFlags, SetArg, Termios};
use std::io::{self, Read, Write};
use std::os::unix::io::RawFd;

/// The terminal operations the editor needs: entering/leaving raw mode and
/// byte-level input/output.
pub trait Terminal {
    /// Switches `fd` into raw mode (spec.md §4.8: "no echo, no canonical
    /// line discipline, no signal generation by the terminal driver,
    /// 8-bit, 1-byte reads"), returning the previous settings so the
    /// caller can restore them.
    fn enable_raw_mode(&mut self, fd: RawFd) -> io::Result<Termios>;

    /// Restores `fd` to `previous` (spec.md §5: "every `enable_raw_mode`
    /// is matched by a `disable_raw_mode`... settings equal their
    /// pre-call state").
    fn disable_raw_mode(&mut self, fd: RawFd, previous: &Termios) -> io::Result<()>;

    /// Reads exactly one byte, blocking until available.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Writes `bytes` and flushes immediately, so redraws are visible
    /// before the next blocking read.
    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;
}

/// The real terminal, reading stdin and writing stdout directly.
#[derive(Debug, Default)]
pub struct RealTerminal;

impl Terminal for RealTerminal {
    fn enable_raw_mode(&mut self, fd: RawFd) -> io::Result<Termios> {
        // SAFETY: `fd` is a valid, open terminal descriptor for the
        // duration of this call.
        let original = termios::tcgetattr(unsafe { borrow(fd) })?;
        let mut raw = original.clone();
        termios::cfmakeraw(&mut raw);
        raw.local_flags.remove(LocalFlags::ISIG);
        termios::tcsetattr(unsafe { borrow(fd) }, SetArg::TCSANOW, &raw)?;
        log::debug!("raw mode enabled on fd {fd}");
        Ok(original)
    }

    fn disable_raw_mode(&mut self, fd: RawFd, previous: &Termios) -> io::Result<()> {
        // SAFETY: see `enable_raw_mode`.
        termios::tcsetattr(unsafe { borrow(fd) }, SetArg::TCSANOW, previous)?;
        log::debug!("raw mode disabled on fd {fd}");
        Ok(())
    }

    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        match io::stdin().read(&mut buf) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(bytes)?;
        stdout.flush()
    }
}

/// # Safety
/// Caller guarantees `fd` names a descriptor open for the lifetime of the
/// returned borrow.
unsafe fn borrow(fd: RawFd) -> std::os::fd::BorrowedFd<'static> {
    std::os::fd::BorrowedFd::borrow_raw(fd)
}
