//! Locates and runs `~/.aisharc` at startup (spec.md §6 "Configuration
//! file"). The file-discovery mechanics are grounded on
//! `yash-cli/src/startup/init_file.rs`'s `run_init_file`; the content
//! semantics (non-comment, non-blank lines executed as if typed at the
//! prompt; syntax errors reported but non-fatal) are spec.md's own.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;
use aisha_syntax::parse_line;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

/// Why a line of the rc file could not be run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}: line {line}: {source}")]
    Syntax {
        path: PathBuf,
        line: usize,
        #[source]
        source: aisha_syntax::ParseError,
    },
}

/// The default rc file path, `$HOME/.aisharc`, or `None` if `$HOME`
/// cannot be resolved.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".aisharc"))
}

/// Runs `path` as a sequence of shell lines in `env`. A missing file is
/// not reported (first run has none); other I/O errors and per-line
/// syntax errors are reported to standard error without aborting the
/// rest of the file (spec.md §6: "Syntax errors are reported to the
/// error stream and do not abort startup").
pub fn run<S: System>(env: &mut Env<S>, builtins: &BuiltinTable<S>, path: &std::path::Path) {
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return,
        Err(e) => {
            report(&ConfigError::Io {
                path: path.to_owned(),
                source: e,
            });
            return;
        }
    };

    for (number, raw_line) in contents.lines().enumerate() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let expanded = aisha_semantics::expansion::expand_line(raw_line, env);
        match parse_line(&expanded) {
            Ok(list) => {
                aisha_semantics::run_list(env, builtins, &list, raw_line);
            }
            Err(e) => report(&ConfigError::Syntax {
                path: path.to_owned(),
                line: number + 1,
                source: e,
            }),
        }
    }
}

fn report(error: &ConfigError) {
    eprintln!("aisha: {error}");
}
