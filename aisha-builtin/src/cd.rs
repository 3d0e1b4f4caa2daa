//! `cd` built-in: changes the working directory and updates `$PWD`/`$OLDPWD`.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `cd [directory]`. With no operand, changes to `$HOME`; `$HOME` unset or
/// empty is a usage error (exit status 2). On success `$OLDPWD` is set to
/// the previous working directory and `$PWD` to the new one.
pub fn cd<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let target = match args.get(1) {
        Some(dir) => dir.clone(),
        None => match env.variables.get_value("HOME") {
            Some(home) if !home.is_empty() => home.to_owned(),
            _ => {
                eprintln!("cd: HOME not set");
                return 2;
            }
        },
    };

    if let Err(e) = env.system.chdir(&target) {
        eprintln!("cd: {target}: {e}");
        return 1;
    }

    let old_pwd = env.variables.get_value("PWD").unwrap_or("").to_owned();
    let new_pwd = env.system.getcwd().unwrap_or(target);
    let _ = env.variables.assign("OLDPWD", old_pwd);
    let _ = env.variables.assign("PWD", new_pwd);
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisha_env::RealSystem;
    use nix::unistd::Pid;
    use tempfile::tempdir;

    #[test]
    fn changes_to_given_directory_and_updates_pwd() {
        let dir = tempdir().unwrap();
        let mut env = Env::new(RealSystem, Pid::this(), "aisha");
        let builtins: BuiltinTable<RealSystem> = BuiltinTable::new();
        let args = vec!["cd".to_string(), dir.path().to_string_lossy().into_owned()];
        let status = cd(&mut env, &args, &builtins);
        assert_eq!(status, 0);
        assert_eq!(env.variables.get_value("PWD").map(str::to_owned), Some(env.system.getcwd().unwrap()));
    }
}
