//! The interactive read-eval-print loop: reads one line from the editor,
//! resolves `!N` history references, runs it through expansion, parsing,
//! and the executor, then drains completed jobs before the next prompt
//! (spec.md §2 "Control flows top-down from the main loop, which between
//! iterations drains completed background jobs and re-renders the
//! prompt").

use crate::prompt;
use aisha_editor::{Editor, ReadOutcome, Terminal};
use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;
use aisha_semantics::job_control::{self, JobNotice};
use aisha_syntax::parse_line;

/// Runs the loop until end of session (Ctrl-D on an empty line, or an
/// explicit `exit`), returning the status the process should exit with.
pub fn run<S: System, T: Terminal>(
    env: &mut Env<S>,
    builtins: &BuiltinTable<S>,
    editor: &mut Editor<T>,
) -> i32 {
    loop {
        for notice in job_control::drain(env) {
            print_notice(notice);
        }

        let prompt = prompt::render(env);
        let line = match editor.read_line(env, builtins, &prompt) {
            Ok(ReadOutcome::Eof) => return env.exit_status,
            Ok(ReadOutcome::Line(line)) => line,
            Err(e) => {
                eprintln!("aisha: {e}");
                return 1;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        let resolved = substitute_history_reference(&line, env);
        if resolved != line {
            println!("{resolved}");
        }
        // Persisted immediately rather than batched until exit (spec.md
        // §3/§6: "written on every mutation") so a session killed by signal
        // still leaves the line behind.
        env.record_history(resolved.clone());

        let expanded = aisha_semantics::expansion::expand_line(&resolved, env);
        match parse_line(&expanded) {
            Ok(list) => {
                aisha_semantics::run_list(env, builtins, &list, &resolved);
            }
            Err(e) => eprintln!("aisha: {e}"),
        }

        if let Some(status) = env.exit_requested {
            return status;
        }
    }
}

/// `!N` re-parses the *original* line recorded at history position `N`
/// (1-indexed, the same numbering the `history` built-in prints) through
/// the full expansion pipeline fresh, rather than replaying a cached
/// token stream (spec.md §9 design note). Any other line is returned
/// unchanged.
fn substitute_history_reference<S: System>(line: &str, env: &Env<S>) -> String {
    let Some(digits) = line.strip_prefix('!') else {
        return line.to_owned();
    };
    let Ok(index) = digits.parse::<usize>() else {
        return line.to_owned();
    };
    match env.history.iter().nth(index.wrapping_sub(1)) {
        Some(entry) => entry.to_owned(),
        None => {
            eprintln!("aisha: !{digits}: event not found");
            String::new()
        }
    }
}

fn print_notice(notice: JobNotice) {
    match notice {
        JobNotice::Exited(id, 0) => println!("{}  Done", id.bracketed()),
        JobNotice::Exited(id, code) => println!("{}  Done({code})", id.bracketed()),
        JobNotice::Signaled(id, signal) => println!("{}  Terminated (signal {signal})", id.bracketed()),
        JobNotice::Stopped(id) => println!("{}  Stopped", id.bracketed()),
        JobNotice::Continued(id) => println!("{}  Continued", id.bracketed()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisha_env::RealSystem;
    use nix::unistd::getpid;

    #[test]
    fn unprefixed_line_is_unchanged() {
        let env = Env::new(RealSystem, getpid(), "aisha");
        assert_eq!(substitute_history_reference("echo hi", &env), "echo hi");
    }

    #[test]
    fn reference_resolves_to_recorded_entry() {
        let mut env = Env::new(RealSystem, getpid(), "aisha");
        env.history.push("echo first");
        env.history.push("echo second");
        assert_eq!(substitute_history_reference("!1", &env), "echo first");
        assert_eq!(substitute_history_reference("!2", &env), "echo second");
    }

    #[test]
    fn unknown_reference_reports_and_yields_empty() {
        let env = Env::new(RealSystem, getpid(), "aisha");
        assert_eq!(substitute_history_reference("!9", &env), "");
    }
}
