//! Installing a [`SimpleCommand`]'s redirections onto file descriptors 0/1
//! (spec.md §4.5). Used both in forked children (installed permanently) and
//! around synchronously-run built-ins (installed, then
//! [`restore`]d, spec.md §4.5 "save current standard input/output...
//! restore").

use aisha_env::{Env, OpenSpec, System};
use aisha_syntax::SimpleCommand;
use std::os::unix::io::RawFd;

/// The shell's standard input and output descriptors, saved aside before a
/// built-in installs its own redirections.
pub struct SavedStdio {
    stdin: RawFd,
    stdout: RawFd,
}

/// Opens and installs `command`'s input/output redirections onto
/// descriptors 0 and 1, in the modes spec.md §6 specifies. The newly opened
/// descriptor is closed immediately after `dup2`, per spec.md §5
/// "Descriptor hygiene".
pub fn install<S: System>(env: &mut Env<S>, command: &SimpleCommand) -> nix::Result<()> {
    if let Some(file) = &command.input {
        let fd = env.system.open_for_redirection(file, OpenSpec::ReadOnly)?;
        env.system.dup2(fd, 0)?;
        env.system.close(fd)?;
    }
    if let Some(output) = &command.output {
        let spec = if output.append { OpenSpec::Append } else { OpenSpec::Truncate };
        let fd = env.system.open_for_redirection(&output.file, spec)?;
        env.system.dup2(fd, 1)?;
        env.system.close(fd)?;
    }
    Ok(())
}

/// Saves descriptors 0 and 1 aside via `dup(2)` so they can be restored
/// after a synchronously-run built-in installs its own redirections.
pub fn save<S: System>(env: &mut Env<S>) -> nix::Result<SavedStdio> {
    Ok(SavedStdio {
        stdin: env.system.dup(0)?,
        stdout: env.system.dup(1)?,
    })
}

/// Restores descriptors 0 and 1 from a prior [`save`], closing the saved
/// copies afterward.
pub fn restore<S: System>(env: &mut Env<S>, saved: SavedStdio) -> nix::Result<()> {
    env.system.dup2(saved.stdin, 0)?;
    env.system.dup2(saved.stdout, 1)?;
    env.system.close(saved.stdin)?;
    env.system.close(saved.stdout)?;
    Ok(())
}
