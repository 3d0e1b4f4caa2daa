//! `test`/`[` built-in: the one conditional-expression surface this shell
//! keeps (spec.md Non-goals: "functions/loops/conditionals as syntactic
//! forms (only the `test` and `[` built-ins are provided)").
//!
//! Supports the common unary file/string tests, binary string and integer
//! comparisons, and `!` negation — not the full POSIX grammar's operator
//! precedence and `-a`/`-o` combinators, which this shell does not expose
//! any syntax to build complex expressions with anyway.

use aisha_env::{Env, System};
use aisha_semantics::builtin::BuiltinTable;
use std::path::Path;

/// `test EXPR`.
pub fn test<S: System>(_env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    evaluate(&args[1..])
}

/// `[ EXPR ]`: identical to `test`, but requires a trailing `]`.
pub fn bracket<S: System>(_env: &mut Env<S>, args: &[String], _builtins: &BuiltinTable<S>) -> i32 {
    let Some((last, rest)) = args[1..].split_last() else {
        eprintln!("[: missing ']'");
        return 2;
    };
    if last != "]" {
        eprintln!("[: missing ']'");
        return 2;
    }
    evaluate(rest)
}

fn evaluate(expr: &[String]) -> i32 {
    match expr {
        [] => 1,
        [first, rest @ ..] if first == "!" => bool_to_status(evaluate(rest) != 0),
        [op, operand] => unary(op, operand),
        [left, op, right] => binary(left, op, right),
        [single] => bool_to_status(!single.is_empty()),
        _ => {
            eprintln!("test: too many arguments");
            2
        }
    }
}

fn unary(op: &str, operand: &str) -> i32 {
    let result = match op {
        "-z" => operand.is_empty(),
        "-n" => !operand.is_empty(),
        "-e" => Path::new(operand).exists(),
        "-f" => Path::new(operand).is_file(),
        "-d" => Path::new(operand).is_dir(),
        "-r" => access(operand, nix::unistd::AccessFlags::R_OK),
        "-w" => access(operand, nix::unistd::AccessFlags::W_OK),
        "-x" => access(operand, nix::unistd::AccessFlags::X_OK),
        _ => {
            eprintln!("test: {op}: unknown unary operator");
            return 2;
        }
    };
    bool_to_status(result)
}

fn access(path: &str, flag: nix::unistd::AccessFlags) -> bool {
    nix::unistd::access(path, flag).is_ok()
}

fn binary(left: &str, op: &str, right: &str) -> i32 {
    let result = match op {
        "=" | "==" => left == right,
        "!=" => left != right,
        "-eq" => parse_ints(left, right).is_some_and(|(l, r)| l == r),
        "-ne" => parse_ints(left, right).is_some_and(|(l, r)| l != r),
        "-lt" => parse_ints(left, right).is_some_and(|(l, r)| l < r),
        "-le" => parse_ints(left, right).is_some_and(|(l, r)| l <= r),
        "-gt" => parse_ints(left, right).is_some_and(|(l, r)| l > r),
        "-ge" => parse_ints(left, right).is_some_and(|(l, r)| l >= r),
        _ => {
            eprintln!("test: {op}: unknown binary operator");
            return 2;
        }
    };
    bool_to_status(result)
}

fn parse_ints(left: &str, right: &str) -> Option<(i64, i64)> {
    Some((left.parse().ok()?, right.parse().ok()?))
}

fn bool_to_status(result: bool) -> i32 {
    if result {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_equality() {
        assert_eq!(evaluate(&["abc".into(), "=".into(), "abc".into()]), 0);
        assert_eq!(evaluate(&["abc".into(), "=".into(), "xyz".into()]), 1);
    }

    #[test]
    fn integer_comparison() {
        assert_eq!(evaluate(&["3".into(), "-lt".into(), "5".into()]), 0);
        assert_eq!(evaluate(&["5".into(), "-lt".into(), "3".into()]), 1);
    }

    #[test]
    fn empty_string_checks() {
        assert_eq!(evaluate(&["-z".into(), "".into()]), 0);
        assert_eq!(evaluate(&["-n".into(), "x".into()]), 0);
    }

    #[test]
    fn negation() {
        assert_eq!(evaluate(&["!".into(), "-z".into(), "x".into()]), 0);
    }
}
