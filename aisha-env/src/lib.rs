//! Execution environment for the aisha shell (spec.md §3 "Lifecycle",
//! §9 "Shared-mutable global stores ... must become explicit state").
//!
//! This crate owns every piece of state that outlives a single input line:
//! the variable, alias, job, and history stores, the signal dispatcher's
//! foreground-pid cell, and the seam to the operating system
//! ([`system::System`]). [`Env`] bundles all of it into one value threaded
//! explicitly through `aisha-semantics`, `aisha-builtin`, and `aisha-cli`,
//! mirroring how `yash_env::Env` is the single state object the rest of the
//! teacher workspace is built around.

pub mod alias;
pub mod assistant;
pub mod error;
pub mod history;
pub mod job;
pub mod signal;
pub mod system;
pub mod variable;

pub use alias::{Alias, AliasSet};
pub use assistant::{AssistantClient, NullAssistant};
pub use error::{Error, Result};
pub use history::HistoryRing;
pub use job::{Job, JobId, JobStatus, JobTable};
pub use system::{OpenSpec, RealSystem, System};
pub use variable::{Variable, VariableFlag, VariableSet};

use nix::unistd::Pid;
use std::path::PathBuf;

/// Default history ring capacity, used when no explicit size is configured
/// (spec.md §3 "History ring": "A fixed-capacity ordered sequence").
pub const DEFAULT_HISTORY_CAPACITY: usize = 1000;

/// The shell's whole execution environment.
///
/// One `Env` is created at startup and lives for the process's lifetime
/// (spec.md §3 "Lifecycle": "Variable, alias, job, and history stores live
/// for the shell's process lifetime"). Tokens, commands, pipelines, and
/// lists are transient and never stored here.
pub struct Env<S: System> {
    pub system: S,
    pub variables: VariableSet,
    pub aliases: AliasSet,
    pub jobs: JobTable,
    pub history: HistoryRing,
    /// Where `history` is persisted, or `None` if the history file's
    /// location could not be resolved at startup. Spec.md §3/§6: the ring
    /// is "persisted to a user-scoped file on mutation" and "written on
    /// every mutation" — callers should save through this path right after
    /// every [`HistoryRing::push`], not just at shutdown.
    pub history_path: Option<PathBuf>,
    /// `$?`: exit status of the most recent foreground pipeline or built-in.
    pub exit_status: i32,
    /// `$$`.
    pub shell_pid: Pid,
    /// `$!`: pid of the most recently launched background supervisor.
    pub last_background_pid: Option<Pid>,
    /// `$1`...`$9`, `$#`.
    pub positional_params: Vec<String>,
    /// `$0`, defaulting to the shell's own name.
    pub arg0: String,
    /// Set by the `exit` built-in; the main loop checks this after every
    /// line and terminates the process with this status once it is
    /// `Some`, restoring terminal state first (spec.md §7: "an explicit
    /// `exit` command terminate[s]").
    pub exit_requested: Option<i32>,
}

impl<S: System> Env<S> {
    /// Builds a fresh environment: imports the process environment as
    /// exported variables (spec.md §6 "Environment bridge"), installs a
    /// history ring of [`DEFAULT_HISTORY_CAPACITY`], and records the
    /// calling process as `$$`.
    #[must_use]
    pub fn new(system: S, shell_pid: Pid, arg0: impl Into<String>) -> Self {
        let mut variables = VariableSet::new();
        variables.import_from_environment();
        Env {
            system,
            variables,
            aliases: AliasSet::new(),
            jobs: JobTable::new(),
            history: HistoryRing::new(DEFAULT_HISTORY_CAPACITY),
            history_path: None,
            exit_status: 0,
            shell_pid,
            last_background_pid: None,
            positional_params: Vec::new(),
            arg0: arg0.into(),
            exit_requested: None,
        }
    }

    /// Pushes `line` onto `history` and, if [`Env::history_path`] is set,
    /// immediately persists the whole ring to it (spec.md §3/§6: "written
    /// on every mutation"), logging a warning rather than failing the
    /// command if the write itself errors.
    pub fn record_history(&mut self, line: impl Into<String>) {
        self.history.push(line);
        if let Some(path) = &self.history_path {
            if let Err(e) = self.history.save(path) {
                log::warn!("could not save history to {}: {e}", path.display());
            }
        }
    }

    /// Resolves one of the special, computed variables spec.md §3/§6 name
    /// (`$?`, `$$`, `$!`, `$#`, `$0`...`$9`), or `None` if `name` does not
    /// refer to one — in which case the caller should fall back to
    /// [`VariableSet::get_value`].
    #[must_use]
    pub fn special_variable(&self, name: &str) -> Option<String> {
        match name {
            "?" => Some(self.exit_status.to_string()),
            "$" => Some(self.shell_pid.as_raw().to_string()),
            "!" => self.last_background_pid.map(|p| p.as_raw().to_string()),
            "#" => Some(self.positional_params.len().to_string()),
            "0" => Some(self.arg0.clone()),
            _ => {
                let digit = name.parse::<usize>().ok()?;
                if !(1..=9).contains(&digit) || name.len() != 1 {
                    return None;
                }
                Some(self.positional_params.get(digit - 1).cloned().unwrap_or_default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct NoopSystem;

    impl System for NoopSystem {
        fn pipe(&mut self) -> nix::Result<(std::os::unix::io::RawFd, std::os::unix::io::RawFd)> {
            unimplemented!()
        }
        fn dup2(&mut self, _: std::os::unix::io::RawFd, _: std::os::unix::io::RawFd) -> nix::Result<()> {
            unimplemented!()
        }
        fn dup(&mut self, _: std::os::unix::io::RawFd) -> nix::Result<std::os::unix::io::RawFd> {
            unimplemented!()
        }
        fn close(&mut self, _: std::os::unix::io::RawFd) -> nix::Result<()> {
            unimplemented!()
        }
        fn open_for_redirection(&mut self, _: &str, _: OpenSpec) -> nix::Result<std::os::unix::io::RawFd> {
            unimplemented!()
        }
        fn fork(&mut self) -> nix::Result<Option<Pid>> {
            unimplemented!()
        }
        fn execve(
            &mut self,
            _: &std::ffi::CString,
            _: &[std::ffi::CString],
            _: &[std::ffi::CString],
        ) -> nix::Result<()> {
            unimplemented!()
        }
        fn wait(&mut self, _: Pid) -> nix::Result<nix::sys::wait::WaitStatus> {
            unimplemented!()
        }
        fn poll(&mut self, _: Pid) -> nix::Result<Option<nix::sys::wait::WaitStatus>> {
            unimplemented!()
        }
        fn kill(&mut self, _: Pid, _: nix::sys::signal::Signal) -> nix::Result<()> {
            unimplemented!()
        }
        fn chdir(&mut self, _: &str) -> nix::Result<()> {
            unimplemented!()
        }
        fn getcwd(&mut self) -> nix::Result<String> {
            unimplemented!()
        }
        fn isatty(&self, _: std::os::unix::io::RawFd) -> bool {
            false
        }
        fn exit_immediately(&mut self, _: i32) -> ! {
            unimplemented!()
        }
    }

    #[test]
    fn record_history_persists_immediately() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        let mut env = Env::new(NoopSystem, Pid::from_raw(123), "aisha");
        env.history_path = Some(path.clone());

        env.record_history("echo one");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "echo one\n");

        env.record_history("echo two");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "echo one\necho two\n");
    }

    #[test]
    fn special_variables_resolve() {
        let mut env = Env::new(NoopSystem, Pid::from_raw(123), "aisha");
        env.exit_status = 7;
        env.last_background_pid = Some(Pid::from_raw(456));
        env.positional_params = vec!["a".into(), "b".into()];
        assert_eq!(env.special_variable("?"), Some("7".into()));
        assert_eq!(env.special_variable("$"), Some("123".into()));
        assert_eq!(env.special_variable("!"), Some("456".into()));
        assert_eq!(env.special_variable("#"), Some("2".into()));
        assert_eq!(env.special_variable("0"), Some("aisha".into()));
        assert_eq!(env.special_variable("1"), Some("a".into()));
        assert_eq!(env.special_variable("9"), Some("".into()));
        assert_eq!(env.special_variable("FOO"), None);
    }
}
