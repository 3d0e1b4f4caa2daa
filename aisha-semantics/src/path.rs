//! `$PATH` search for external commands (spec.md §4.5: "the command...
//! replace the image with the external program searched on the path").

use nix::unistd::{access, AccessFlags};
use std::path::{Path, PathBuf};

/// Resolves `name` to an executable file: if it contains a `/`, it is used
/// as given (relative to the working directory); otherwise each directory in
/// `path_var` (a colon-separated `$PATH`-shaped string) is tried in order.
/// Returns `None` if no executable is found, which the executor reports as
/// `command not found` (exit status 127, spec.md §6).
#[must_use]
pub fn resolve(name: &str, path_var: &str) -> Option<PathBuf> {
    if name.contains('/') {
        return is_executable_file(Path::new(name)).then(|| PathBuf::from(name));
    }
    for dir in path_var.split(':') {
        let dir = if dir.is_empty() { "." } else { dir };
        let candidate = Path::new(dir).join(name);
        if is_executable_file(&candidate) {
            return Some(candidate);
        }
    }
    None
}

fn is_executable_file(path: &Path) -> bool {
    path.is_file() && access(path, AccessFlags::X_OK).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::os::unix::fs::PermissionsExt;
    use tempfile::tempdir;

    #[test]
    fn finds_executable_in_path() {
        let dir = tempdir().unwrap();
        let bin = dir.path().join("mytool");
        File::create(&bin).unwrap();
        fs::set_permissions(&bin, fs::Permissions::from_mode(0o755)).unwrap();

        let path_var = dir.path().to_string_lossy().into_owned();
        assert_eq!(resolve("mytool", &path_var), Some(bin));
    }

    #[test]
    fn non_executable_is_skipped() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("notexec");
        File::create(&file).unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o644)).unwrap();

        let path_var = dir.path().to_string_lossy().into_owned();
        assert_eq!(resolve("notexec", &path_var), None);
    }

    #[test]
    fn missing_command_is_none() {
        assert_eq!(resolve("definitely-not-a-real-command", "/nonexistent"), None);
    }
}
