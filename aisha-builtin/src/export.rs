//! `export` built-in.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;

/// `export NAME[=value]...`. With no operands, lists exported variables as
/// `NAME=value` pairs.
pub fn export<S: System>(env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    if args.len() == 1 {
        let mut pairs: Vec<(String, String)> = env
            .variables
            .exported_pairs()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        pairs.sort();
        for (name, value) in pairs {
            println!("export {name}={value}");
        }
        return 0;
    }

    let mut status = 0;
    for arg in &args[1..] {
        let result = match arg.split_once('=') {
            Some((name, value)) => env.variables.assign(name, value).and_then(|()| env.variables.export(name)),
            None => env.variables.export(arg),
        };
        if let Err(e) = result {
            eprintln!("export: {e}");
            status = 1;
        }
    }
    status
}
