//! Pathname (glob) expansion (spec.md §4.3, last bullet list).
//!
//! Applied after tokenization, to each unquoted [`Word`](aisha_syntax::TokenKind::Word)
//! token whose text contains a glob metacharacter. [`aisha_fnmatch::Pattern`]
//! matches one path component against one pattern; this module walks the
//! directory tree component by component, applies the hidden-file rule, and
//! falls back to the literal pattern when nothing matches.

use aisha_fnmatch::{has_metacharacters, Pattern};
use std::fs;
use std::path::{Path, PathBuf};

/// Expands `word` into the sorted list of matching pathnames, or a
/// single-element vector containing `word` unchanged if it has no glob
/// metacharacters or nothing on disk matches it.
#[must_use]
pub fn expand(word: &str) -> Vec<String> {
    if !has_metacharacters(word) {
        return vec![word.to_string()];
    }

    let absolute = word.starts_with('/');
    let trimmed = word.trim_start_matches('/');
    if trimmed.is_empty() {
        return vec![word.to_string()];
    }
    let components: Vec<&str> = trimmed.split('/').collect();

    let root = if absolute { PathBuf::from("/") } else { PathBuf::from(".") };
    let mut current: Vec<PathBuf> = vec![root];

    for (idx, component) in components.iter().enumerate() {
        let is_last = idx + 1 == components.len();
        let mut next = Vec::new();
        if !has_metacharacters(component) {
            for dir in &current {
                let candidate = dir.join(component);
                if is_last || candidate.is_dir() {
                    next.push(candidate);
                }
            }
        } else {
            let Ok(pattern) = Pattern::parse(component) else {
                return vec![word.to_string()];
            };
            let hidden_ok = component.starts_with('.');
            for dir in &current {
                let Ok(entries) = fs::read_dir(dir) else {
                    continue;
                };
                for entry in entries.flatten() {
                    let name = entry.file_name();
                    let name = name.to_string_lossy();
                    if name.starts_with('.') && !hidden_ok {
                        continue;
                    }
                    if !pattern.matches(&name) {
                        continue;
                    }
                    let candidate = dir.join(&*name);
                    if is_last || candidate.is_dir() {
                        next.push(candidate);
                    }
                }
            }
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }

    if current.is_empty() {
        return vec![word.to_string()];
    }

    let mut results: Vec<String> = current.iter().map(|p| display_path(p, absolute)).collect();
    results.sort();
    results
}

/// Renders an expansion result back to the form the user would type: the
/// leading `./` this crate adds for relative lookups is stripped, since
/// spec.md's matching algorithm treats patterns as relative pathnames.
fn display_path(path: &Path, absolute: bool) -> String {
    if absolute {
        return path.to_string_lossy().into_owned();
    }
    path.strip_prefix(".")
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn literal_pattern_kept_on_no_match() {
        assert_eq!(expand("no_such_file_*.xyz"), vec!["no_such_file_*.xyz".to_string()]);
    }

    #[test]
    fn non_glob_word_passes_through() {
        assert_eq!(expand("plain.txt"), vec!["plain.txt".to_string()]);
    }

    #[test]
    fn matches_and_sorts_in_directory() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join("b.rs")).unwrap();
        File::create(dir.path().join("a.rs")).unwrap();
        File::create(dir.path().join(".hidden.rs")).unwrap();

        let pattern = dir.path().join("*.rs");
        let matches = expand(pattern.to_str().unwrap());
        assert_eq!(
            matches,
            vec![
                dir.path().join("a.rs").to_string_lossy().into_owned(),
                dir.path().join("b.rs").to_string_lossy().into_owned(),
            ]
        );
    }

    #[test]
    fn hidden_files_need_leading_dot_pattern() {
        let dir = tempdir().unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        File::create(dir.path().join("visible")).unwrap();

        let star = dir.path().join("*");
        assert!(!expand(star.to_str().unwrap())
            .iter()
            .any(|p| p.ends_with(".hidden")));

        let dotstar = dir.path().join(".*");
        assert!(expand(dotstar.to_str().unwrap())
            .iter()
            .any(|p| p.ends_with(".hidden")));
    }
}
