//! Wiring a [`Pipeline`]'s stages together with `pipe(2)` (spec.md §4.5
//! "Pipeline").
//!
//! Every stage runs in its own forked child, even a lone built-in, since a
//! pipeline stage's stdout/stdin are fixed to pipe descriptors for its whole
//! lifetime and a built-in invoked synchronously in the shell's own process
//! could not be undone cleanly once other stages are already reading from
//! it. The parent closes every pipe descriptor immediately once all
//! children are forked (spec.md §5 "Descriptor hygiene": "no pipe
//! descriptor may be left open in the parent once forking completes").

use crate::builtin::BuiltinTable;
use crate::executor::command::interpret_foreground;
use crate::{path, redir};
use aisha_env::{Env, JobStatus, System};
use aisha_syntax::{Command, Pipeline, SimpleCommand};
use nix::sys::wait::WaitStatus;
use std::ffi::CString;
use std::os::unix::io::RawFd;

/// Runs every stage of `pipeline`, connecting each stage's stdout to the
/// next stage's stdin, and returns the interpreted status of the *last*
/// stage only — every earlier stage is reaped but does not affect the
/// result (spec.md §8 seed scenario 4: a non-matching `grep` mid-pipeline
/// must not make `$?` non-zero when the final stage succeeds).
pub fn run<S: System>(
    env: &mut Env<S>,
    builtins: &BuiltinTable<S>,
    pipeline: &Pipeline,
    source: &str,
) -> i32 {
    let stage_count = pipeline.stages.len();
    if stage_count == 1 {
        return crate::executor::command::run_single(env, builtins, &pipeline.stages[0], source);
    }

    let mut pipes = Vec::with_capacity(stage_count - 1);
    for _ in 0..stage_count - 1 {
        match env.system.pipe() {
            Ok(p) => pipes.push(p),
            Err(e) => {
                eprintln!("pipe: {e}");
                close_all(env, &pipes);
                return 1;
            }
        }
    }

    let mut children = Vec::with_capacity(stage_count);
    for (index, command) in pipeline.stages.iter().enumerate() {
        match env.system.fork() {
            Ok(None) => run_stage_child(env, builtins, command, index, stage_count, &pipes, source),
            Ok(Some(child)) => children.push(child),
            Err(e) => {
                eprintln!("fork: {e}");
                close_all(env, &pipes);
                return 1;
            }
        }
    }

    close_all(env, &pipes);

    let last = children.last().copied();
    if let Some(last) = last {
        aisha_env::signal::set_foreground(last);
    }

    let mut final_status = 0;
    for child in &children {
        match env.system.wait(*child) {
            Ok(status) => {
                let code = interpret_pipeline_member(env, status, Some(*child) == last, source);
                if Some(*child) == last {
                    final_status = code;
                }
            }
            Err(e) => eprintln!("wait: {e}"),
        }
    }
    aisha_env::signal::clear_foreground();
    final_status
}

fn interpret_pipeline_member<S: System>(
    env: &mut Env<S>,
    status: WaitStatus,
    is_last: bool,
    source: &str,
) -> i32 {
    if is_last {
        return interpret_foreground(env, status, source);
    }
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

fn close_all<S: System>(env: &mut Env<S>, pipes: &[(RawFd, RawFd)]) {
    for (read_fd, write_fd) in pipes {
        let _ = env.system.close(*read_fd);
        let _ = env.system.close(*write_fd);
    }
}

/// Runs entirely inside a forked pipeline-stage child: wires stdin/stdout to
/// the adjoining pipes, resets signal dispositions, installs the stage's own
/// redirections (which take precedence over the pipe wiring, matching how a
/// stage with both a pipe and an explicit `<`/`>` behaves), then either runs
/// a built-in synchronously and exits, execs an external program, or
/// recurses into a subshell's list. Never returns.
fn run_stage_child<S: System>(
    env: &mut Env<S>,
    builtins: &BuiltinTable<S>,
    command: &Command,
    index: usize,
    stage_count: usize,
    pipes: &[(RawFd, RawFd)],
    source: &str,
) -> ! {
    if index > 0 {
        let _ = env.system.dup2(pipes[index - 1].0, 0);
    }
    if index < stage_count - 1 {
        let _ = env.system.dup2(pipes[index].1, 1);
    }
    close_all(env, pipes);

    if aisha_env::signal::reset_to_default().is_err() {
        env.system.exit_immediately(1);
    }

    match command {
        Command::Simple(simple) => run_simple_stage(env, builtins, simple),
        Command::Subshell(list) => {
            let status = crate::executor::run_list(env, builtins, list, source);
            env.system.exit_immediately(status);
        }
    }
}

fn run_simple_stage<S: System>(env: &mut Env<S>, builtins: &BuiltinTable<S>, simple: &SimpleCommand) -> ! {
    if redir::install(env, simple).is_err() {
        env.system.exit_immediately(126);
    }

    let args: Vec<String> = simple
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
    let Some(name) = args.first() else {
        env.system.exit_immediately(0);
    };

    if let Some(builtin) = builtins.get(name.as_str()) {
        let status = builtin(env, &args, builtins);
        env.system.exit_immediately(status);
    }

    let path_var = env.variables.get_value("PATH").unwrap_or("").to_owned();
    let Some(resolved) = path::resolve(name, &path_var) else {
        eprintln!("{name}: command not found");
        env.system.exit_immediately(127);
    };
    let Some(path) = CString::new(resolved.to_string_lossy().as_bytes()).ok() else {
        env.system.exit_immediately(126);
    };
    let args: Vec<CString> = args
        .iter()
        .filter_map(|a| CString::new(a.as_bytes()).ok())
        .collect();
    let envp: Vec<CString> = env
        .variables
        .exported_pairs()
        .filter_map(|(k, v)| CString::new(format!("{k}={v}")).ok())
        .collect();
    let _ = env.system.execve(&path, &args, &envp);
    env.system.exit_immediately(127);
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

    /// spec.md §8 seed scenario 4: a non-matching `grep` in the middle of a
    /// pipeline must not make `$?` non-zero when the last stage succeeds.
    #[test]
    fn middle_stage_failure_does_not_affect_status() {
        let mut e = env();
        let builtins = HashMap::new();
        let list = parse_line("true | false | true").unwrap();
        let pipeline = &list.items[0].and_or.first;
        assert_eq!(run(&mut e, &builtins, pipeline, "true | false | true"), 0);
    }

    #[test]
    fn last_stage_failure_is_reported() {
        let mut e = env();
        let builtins = HashMap::new();
        let list = parse_line("true | true | false").unwrap();
        let pipeline = &list.items[0].and_or.first;
        assert_eq!(run(&mut e, &builtins, pipeline, "true | true | false"), 1);
    }
}
