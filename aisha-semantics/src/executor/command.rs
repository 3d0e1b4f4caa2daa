//! Running one [`Command`]: a simple command (variable assignment, built-in,
//! or external program) or a parenthesized subshell group (spec.md §4.5
//! "Single command with no pipe", "Subshell").

use crate::builtin::BuiltinTable;
use crate::{path, redir};
use aisha_env::{Env, JobStatus, System};
use aisha_syntax::{Command, List, SimpleCommand};
use nix::sys::wait::WaitStatus;
use std::ffi::CString;

/// Runs a single [`Command`] that is not part of a multi-stage pipeline,
/// i.e. it may run a built-in synchronously in this process.
pub fn run_single<S: System>(
    env: &mut Env<S>,
    builtins: &BuiltinTable<S>,
    command: &Command,
    source: &str,
) -> i32 {
    match command {
        Command::Simple(simple) => run_simple(env, builtins, simple, source),
        Command::Subshell(list) => run_subshell(env, builtins, list, source),
    }
}

fn run_simple<S: System>(
    env: &mut Env<S>,
    builtins: &BuiltinTable<S>,
    simple: &SimpleCommand,
    source: &str,
) -> i32 {
    if let Some((name, value)) = as_assignment(simple) {
        return match env.variables.assign(&name, value) {
            Ok(()) => 0,
            Err(e) => {
                eprintln!("{e}");
                1
            }
        };
    }

    let expanded = expand_globs(simple);
    let Some(name) = expanded.args.first().cloned() else {
        return 0;
    };

    if let Some(builtin) = builtins.get(name.as_str()) {
        return run_builtin_synchronously(env, *builtin, builtins, &expanded);
    }

    run_external(env, &expanded, source)
}

/// Runs a built-in in this process: save stdio, install the command's
/// redirections, invoke it, restore (spec.md §4.5).
fn run_builtin_synchronously<S: System>(
    env: &mut Env<S>,
    builtin: crate::builtin::Builtin<S>,
    builtins: &BuiltinTable<S>,
    simple: &SimpleCommand,
) -> i32 {
    let saved = match redir::save(env) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };
    let status = match redir::install(env, simple) {
        Ok(()) => builtin(env, &simple.args, builtins),
        Err(e) => {
            eprintln!("{e}");
            1
        }
    };
    if let Err(e) = redir::restore(env, saved) {
        eprintln!("{e}");
    }
    status
}

/// Expands each unquoted argument word against the filesystem (spec.md
/// §4.3: "Glob expansion is applied after tokenization, to each unquoted
/// Word token"), flattening any word that matches more than one pathname
/// into separate arguments. Quoted words pass through unchanged.
fn expand_globs(simple: &SimpleCommand) -> SimpleCommand {
    let args = simple
        .args
        .iter()
        .zip(&simple.arg_quoted)
        .flat_map(|(word, &quoted)| {
            if quoted {
                vec![word.clone()]
            } else {
                crate::expansion::glob::expand(word)
            }
        })
        .collect();
    SimpleCommand {
        arg_quoted: vec![false; args.len()],
        args,
        input: simple.input.clone(),
        output: simple.output.clone(),
    }
}

/// Matches spec.md §4.5's variable-assignment shorthand: a lone argument of
/// the form `NAME=value` with no command name following.
fn as_assignment(simple: &SimpleCommand) -> Option<(String, String)> {
    if simple.args.len() != 1 {
        return None;
    }
    let word = &simple.args[0];
    let eq = word.find('=')?;
    if eq == 0 {
        return None;
    }
    let name = &word[..eq];
    if !aisha_env::variable::is_valid_name(name) {
        return None;
    }
    Some((name.to_owned(), word[eq + 1..].to_owned()))
}

fn run_external<S: System>(env: &mut Env<S>, simple: &SimpleCommand, source: &str) -> i32 {
    let path_var = env.variables.get_value("PATH").unwrap_or("").to_owned();
    let name = &simple.args[0];
    let Some(resolved) = path::resolve(name, &path_var) else {
        eprintln!("{name}: command not found");
        return 127;
    };

    match env.system.fork() {
        Ok(None) => exec_in_child(env, simple, &resolved),
        Ok(Some(child)) => {
            aisha_env::signal::set_foreground(child);
            let result = env.system.wait(child);
            aisha_env::signal::clear_foreground();
            match result {
                Ok(status) => interpret_foreground(env, status, source),
                Err(e) => {
                    eprintln!("fork: {e}");
                    1
                }
            }
        }
        Err(e) => {
            eprintln!("fork: {e}");
            1
        }
    }
}

/// Runs entirely inside the forked child: installs redirections, resets
/// signal dispositions, builds `argv`/`envp`, and execs. Never returns.
fn exec_in_child<S: System>(env: &mut Env<S>, simple: &SimpleCommand, resolved: &std::path::Path) -> ! {
    if aisha_env::signal::reset_to_default().is_err() {
        env.system.exit_immediately(126);
    }
    if redir::install(env, simple).is_err() {
        env.system.exit_immediately(126);
    }
    let Some(path) = to_cstring(&resolved.to_string_lossy()) else {
        env.system.exit_immediately(126);
    };
    let args: Vec<CString> = simple.args.iter().filter_map(|a| to_cstring(a)).collect();
    let envp: Vec<CString> = env
        .variables
        .exported_pairs()
        .filter_map(|(k, v)| to_cstring(&format!("{k}={v}")))
        .collect();
    let _ = env.system.execve(&path, &args, &envp);
    env.system.exit_immediately(127);
}

fn to_cstring(s: &str) -> Option<CString> {
    CString::new(s).ok()
}

/// Interprets a blocking wait's result on the foreground pid per spec.md
/// §4.5's status table, registering a job if the child stopped.
pub fn interpret_foreground<S: System>(env: &mut Env<S>, status: WaitStatus, source: &str) -> i32 {
    match status {
        WaitStatus::Exited(_, code) => code,
        WaitStatus::Signaled(_, signal, _) => 128 + signal as i32,
        WaitStatus::Stopped(pid, _) => {
            env.jobs.insert(pid, source.to_owned(), JobStatus::Stopped);
            148
        }
        _ => 0,
    }
}

fn run_subshell<S: System>(
    env: &mut Env<S>,
    builtins: &BuiltinTable<S>,
    list: &List,
    source: &str,
) -> i32 {
    match env.system.fork() {
        Ok(None) => {
            if aisha_env::signal::reset_to_default().is_err() {
                env.system.exit_immediately(1);
            }
            let status = crate::executor::run_list(env, builtins, list, source);
            env.system.exit_immediately(status);
        }
        Ok(Some(child)) => {
            aisha_env::signal::set_foreground(child);
            let result = env.system.wait(child);
            aisha_env::signal::clear_foreground();
            match result {
                Ok(status) => interpret_foreground(env, status, source),
                Err(e) => {
                    eprintln!("fork: {e}");
                    1
                }
            }
        }
        Err(e) => {
            eprintln!("fork: {e}");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisha_env::RealSystem;
    use aisha_syntax::parse_line;
    use nix::unistd::Pid;
    use std::collections::HashMap;

    fn env() -> Env<RealSystem> {
        Env::new(RealSystem, Pid::this(), "aisha")
    }

    #[test]
    fn variable_assignment_sets_store_and_returns_zero() {
        let mut e = env();
        let builtins = HashMap::new();
        let list = parse_line("FOO=bar").unwrap();
        let command = &list.items[0].and_or.first.stages[0];
        let status = run_single(&mut e, &builtins, command, "FOO=bar");
        assert_eq!(status, 0);
        assert_eq!(e.variables.get_value("FOO"), Some("bar"));
    }

    #[test]
    fn external_true_and_false() {
        let mut e = env();
        let builtins = HashMap::new();
        let list = parse_line("true").unwrap();
        let command = &list.items[0].and_or.first.stages[0];
        assert_eq!(run_single(&mut e, &builtins, command, "true"), 0);

        let list = parse_line("false").unwrap();
        let command = &list.items[0].and_or.first.stages[0];
        assert_eq!(run_single(&mut e, &builtins, command, "false"), 1);
    }

    #[test]
    fn missing_command_is_127() {
        let mut e = env();
        let builtins = HashMap::new();
        let list = parse_line("definitely-not-a-real-command-xyz").unwrap();
        let command = &list.items[0].and_or.first.stages[0];
        assert_eq!(
            run_single(&mut e, &builtins, command, "definitely-not-a-real-command-xyz"),
            127
        );
    }

    #[test]
    fn quoted_glob_argument_is_left_literal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::File::create(dir.path().join("a.txt")).unwrap();
        std::fs::File::create(dir.path().join("b.txt")).unwrap();

        let list = parse_line("echo '*.txt'").unwrap();
        let command = &list.items[0].and_or.first.stages[0];
        let Command::Simple(simple) = command else {
            panic!("expected simple command");
        };
        let expanded = expand_globs(simple);
        assert_eq!(expanded.args, vec!["echo", "*.txt"]);
    }

    #[test]
    fn unquoted_glob_argument_expands() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::File::create(dir.path().join("a.txt")).unwrap();
        std::fs::File::create(dir.path().join("b.txt")).unwrap();
        let pattern = dir.path().join("*.txt");

        let list = parse_line(&format!("echo {}", pattern.to_str().unwrap())).unwrap();
        let command = &list.items[0].and_or.first.stages[0];
        let Command::Simple(simple) = command else {
            panic!("expected simple command");
        };
        let expanded = expand_globs(simple);
        assert_eq!(expanded.args.len(), 3);
    }
}
