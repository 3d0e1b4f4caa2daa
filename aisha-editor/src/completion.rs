//! Tab completion (spec.md §4.8 "Completion"): command-position built-in
//! and `$PATH` executables, `$`-prefixed variable names, or filesystem
//! entries, depending on where the cursor sits.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;
use std::fs;
use std::path::Path;

/// The outcome of a completion attempt, telling the editor what to do to
/// the line buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// No candidates matched.
    None,
    /// Exactly one candidate (or several sharing a longer common prefix
    /// than what was typed): replace the word with this text, and if
    /// `trailing_space` append a space (never done for directory names).
    Insert { replacement: String, trailing_space: bool },
    /// Several candidates with no common extension beyond the prefix
    /// already typed: list them for the editor to print.
    List(Vec<String>),
}

/// Computes completions for `word`, given whether it sits in command
/// position.
pub fn complete<S: System>(
    env: &Env<S>,
    builtins: &BuiltinTable<S>,
    word: &str,
    is_command_position: bool,
) -> Completion {
    if is_command_position {
        return from_candidates(command_candidates(env, builtins, word), word, false);
    }
    if let Some(prefix) = word.strip_prefix('$') {
        let candidates: Vec<String> = variable_candidates(env, prefix)
            .into_iter()
            .map(|name| format!("${name}"))
            .collect();
        return from_candidates(candidates, word, false);
    }
    filesystem_completion(word)
}

fn command_candidates<S: System>(env: &Env<S>, builtins: &BuiltinTable<S>, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = builtins
        .keys()
        .filter(|name| name.starts_with(prefix))
        .map(|name| (*name).to_owned())
        .collect();

    let path_var = env.variables.get_value("PATH").unwrap_or_default();
    for dir in path_var.split(':') {
        let dir = if dir.is_empty() { "." } else { dir };
        let Ok(entries) = fs::read_dir(dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with(prefix) && is_executable(&entry.path()) {
                names.push(name);
            }
        }
    }
    names.sort();
    names.dedup();
    names
}

fn is_executable(path: &Path) -> bool {
    path.is_file() && nix::unistd::access(path, nix::unistd::AccessFlags::X_OK).is_ok()
}

fn variable_candidates<S: System>(env: &Env<S>, prefix: &str) -> Vec<String> {
    let mut names: Vec<String> = env
        .variables
        .iter()
        .map(|(name, _)| name.to_owned())
        .filter(|name| name.starts_with(prefix))
        .collect();
    names.sort();
    names.dedup();
    names
}

fn filesystem_completion(word: &str) -> Completion {
    let (dir_part, file_prefix) = match word.rfind('/') {
        Some(i) => (&word[..=i], &word[i + 1..]),
        None => ("", word),
    };
    let dir = if dir_part.is_empty() { "." } else { dir_part };
    let show_hidden = file_prefix.starts_with('.');

    let Ok(entries) = fs::read_dir(dir) else {
        return Completion::None;
    };

    let mut candidates = Vec::new();
    for entry in entries.flatten() {
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_hidden && name.starts_with('.') {
            continue;
        }
        if !name.starts_with(file_prefix) {
            continue;
        }
        let is_dir = entry.path().is_dir();
        let mut full = format!("{dir_part}{name}");
        if is_dir {
            full.push('/');
        }
        candidates.push(full);
    }
    candidates.sort();
    candidates.dedup();
    from_candidates(candidates, word, true)
}

fn from_candidates(mut candidates: Vec<String>, word: &str, path_like: bool) -> Completion {
    candidates.sort();
    candidates.dedup();
    match candidates.as_slice() {
        [] => Completion::None,
        [single] => Completion::Insert {
            replacement: single.clone(),
            trailing_space: !(path_like && single.ends_with('/')),
        },
        _ => {
            let common = longest_common_prefix(&candidates);
            if common.len() > word.len() {
                Completion::Insert {
                    replacement: common,
                    trailing_space: false,
                }
            } else {
                Completion::List(candidates)
            }
        }
    }
}

fn longest_common_prefix(candidates: &[String]) -> String {
    let Some(first) = candidates.first() else {
        return String::new();
    };
    let mut prefix_len = first.len();
    for candidate in &candidates[1..] {
        let shared = first
            .bytes()
            .zip(candidate.bytes())
            .take_while(|(a, b)| a == b)
            .count();
        prefix_len = prefix_len.min(shared);
    }
    first[..prefix_len].to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn longest_common_prefix_of_siblings() {
        let candidates = vec!["listing".to_owned(), "list".to_owned(), "listen".to_owned()];
        assert_eq!(longest_common_prefix(&candidates), "list");
    }

    #[test]
    fn from_candidates_single_gets_inserted() {
        let result = from_candidates(vec!["echo".to_owned()], "ech", false);
        assert_eq!(
            result,
            Completion::Insert {
                replacement: "echo".to_owned(),
                trailing_space: true
            }
        );
    }

    #[test]
    fn from_candidates_no_match_is_none() {
        assert_eq!(from_candidates(Vec::new(), "zz", false), Completion::None);
    }

    #[test]
    fn from_candidates_disjoint_set_lists() {
        let result = from_candidates(vec!["apple".to_owned(), "banana".to_owned()], "", false);
        assert_eq!(result, Completion::List(vec!["apple".to_owned(), "banana".to_owned()]));
    }
}
