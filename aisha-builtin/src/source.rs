//! `source`/`.` built-in: reads a file and runs each line as if typed at
//! the prompt, the same pipeline `aisha-cli`'s rc-file loader drives
//! (grounded on `yash-cli/src/startup/init_file.rs`'s line-at-a-time
//! read-eval loop).

use aisha_env::System;
use aisha_semantics::builtin::BuiltinTable;
use aisha_syntax::parse_line;
use std::fs;

/// `source FILE` / `. FILE`: executes each non-comment, non-blank line of
/// `FILE` in this shell's environment. A syntax error in one line is
/// reported and does not stop the rest of the file from running.
pub fn source<S: System>(env: &mut aisha_env::Env<S>, args: &[String], builtins: &BuiltinTable<S>) -> i32 {
    let Some(path) = args.get(1) else {
        eprintln!("source: filename argument required");
        return 2;
    };

    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("source: {path}: {e}");
            return 1;
        }
    };

    let mut status = 0;
    for raw_line in contents.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let expanded = aisha_semantics::expansion::expand_line(raw_line, env);
        match parse_line(&expanded) {
            Ok(list) => status = aisha_semantics::run_list(env, builtins, &list, raw_line),
            Err(e) => eprintln!("source: {path}: {e}"),
        }
    }
    status
}
