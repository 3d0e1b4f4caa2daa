//! `alias`/`unalias` built-ins.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `alias` (list all), `alias name` (print one), `alias name=value` (define).
pub fn alias<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    if args.len() == 1 {
        let mut entries: Vec<(&str, &str)> = env
            .aliases
            .iter()
            .map(|a| (a.name.as_str(), a.replacement.as_str()))
            .collect();
        entries.sort();
        for (name, replacement) in entries {
            println!("alias {name}='{replacement}'");
        }
        return 0;
    }

    let mut status = 0;
    for arg in &args[1..] {
        match arg.split_once('=') {
            Some((name, value)) => env.aliases.define(name, value),
            None => match env.aliases.get(arg) {
                Some(a) => println!("alias {}='{}'", a.name, a.replacement),
                None => {
                    eprintln!("alias: {arg}: not found");
                    status = 1;
                }
            },
        }
    }
    status
}

/// `unalias name...`.
pub fn unalias<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let mut status = 0;
    for name in &args[1..] {
        if env.aliases.remove(name).is_none() {
            eprintln!("unalias: {name}: not found");
            status = 1;
        }
    }
    status
}
