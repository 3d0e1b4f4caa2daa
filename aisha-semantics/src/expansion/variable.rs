//! Variable interpolation (spec.md §4.3 "Variable pass").
//!
//! Runs once per line, after the alias pass and before tokenization (spec.md
//! §5 "Ordering guarantees"). A hand-written single-pass scanner, in the
//! same style as [`crate::lex`](aisha_syntax::lex)'s tokenizer, rather than a
//! regex crate: the grammar here (`$NAME`, `${NAME}`, `${NAME:-x}`,
//! `${NAME:=x}`, `${#NAME}`, the single-character specials) is small enough
//! that a scanner reads more directly than a pattern would.

use aisha_env::{Env, System};

/// Expands every variable reference in `line`, mutating `env` for the
/// `${NAME:=default}` assignment form.
pub fn expand_line<S: System>(line: &str, env: &mut Env<S>) -> String {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut out = String::with_capacity(len);
    let mut i = 0;

    while i < len {
        match bytes[i] {
            b'\\' if i + 1 < len && bytes[i + 1] == b'$' => {
                out.push('$');
                i += 2;
            }
            b'\\' => {
                out.push('\\');
                i += 1;
            }
            b'$' => {
                let (replacement, consumed) = expand_reference(&line[i..], env);
                out.push_str(&replacement);
                i += consumed.max(1);
            }
            b => {
                out.push(b as char);
                i += 1;
            }
        }
    }

    out
}

/// Expands the single `$`-reference starting at `s[0] == '$'`, returning the
/// replacement text and how many bytes of `s` it consumed. If `s[1]` starts
/// nothing recognizable, the lone `$` passes through unexpanded.
fn expand_reference<S: System>(s: &str, env: &mut Env<S>) -> (String, usize) {
    let bytes = s.as_bytes();
    if bytes.len() < 2 {
        return ("$".to_string(), 1);
    }

    if bytes[1] == b'{' {
        return expand_braced(s, env);
    }

    if matches!(bytes[1], b'?' | b'$' | b'!' | b'#') {
        let name = (bytes[1] as char).to_string();
        return (lookup(&name, env), 2);
    }

    if bytes[1].is_ascii_digit() {
        let name = (bytes[1] as char).to_string();
        return (lookup(&name, env), 2);
    }

    if is_name_start(bytes[1]) {
        let mut end = 2;
        while end < bytes.len() && is_name_continue(bytes[end]) {
            end += 1;
        }
        let name = &s[1..end];
        return (lookup(name, env), end);
    }

    ("$".to_string(), 1)
}

/// Expands `${...}` starting at `s[0..2] == "${"`, supporting `${NAME}`,
/// `${NAME:-default}`, `${NAME:=default}`, and `${#NAME}`.
fn expand_braced<S: System>(s: &str, env: &mut Env<S>) -> (String, usize) {
    let Some(close) = s.find('}') else {
        return ("$".to_string(), 1);
    };
    let inner = &s[2..close];
    let consumed = close + 1;

    if let Some(name) = inner.strip_prefix('#') {
        let len = lookup(name, env).len();
        return (len.to_string(), consumed);
    }

    if let Some((name, default)) = inner.split_once(":-") {
        let current = lookup(name, env);
        let value = if current.is_empty() { default.to_string() } else { current };
        return (value, consumed);
    }

    if let Some((name, default)) = inner.split_once(":=") {
        let current = lookup(name, env);
        if current.is_empty() {
            let _ = env.variables.assign(name, default);
            return (default.to_string(), consumed);
        }
        return (current, consumed);
    }

    (lookup(inner, env), consumed)
}

fn lookup<S: System>(name: &str, env: &Env<S>) -> String {
    if let Some(value) = env.special_variable(name) {
        return value;
    }
    env.variables.get_value(name).map(str::to_owned).unwrap_or_default()
}

fn is_name_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_name_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

#[cfg(test)]
mod tests {
    use super::*;
    use aisha_env::RealSystem;
    use nix::unistd::Pid;

    fn env() -> Env<RealSystem> {
        Env::new(RealSystem, Pid::from_raw(1), "aisha")
    }

    #[test]
    fn expands_plain_and_braced_name() {
        let mut e = env();
        e.variables.assign("FOO", "bar").unwrap();
        assert_eq!(expand_line("$FOO and ${FOO}", &mut e), "bar and bar");
    }

    #[test]
    fn undefined_variable_is_empty() {
        let mut e = env();
        assert_eq!(expand_line("[$UNSET]", &mut e), "[]");
    }

    #[test]
    fn default_value_form() {
        let mut e = env();
        assert_eq!(expand_line("${FOO:-fallback}", &mut e), "fallback");
    }

    #[test]
    fn assigning_default_form_persists() {
        let mut e = env();
        assert_eq!(expand_line("${FOO:=fallback}", &mut e), "fallback");
        assert_eq!(e.variables.get_value("FOO"), Some("fallback"));
    }

    #[test]
    fn length_form() {
        let mut e = env();
        e.variables.assign("FOO", "hello").unwrap();
        assert_eq!(expand_line("${#FOO}", &mut e), "5");
    }

    #[test]
    fn special_variables() {
        let mut e = env();
        e.exit_status = 3;
        assert_eq!(expand_line("$?", &mut e), "3");
        assert_eq!(expand_line("$$", &mut e), e.shell_pid.as_raw().to_string());
    }

    #[test]
    fn escaped_dollar_suppresses_expansion() {
        let mut e = env();
        e.variables.assign("FOO", "bar").unwrap();
        assert_eq!(expand_line(r"\$FOO", &mut e), "$FOO");
    }

    #[test]
    fn lone_dollar_passes_through() {
        let mut e = env();
        assert_eq!(expand_line("a $ b", &mut e), "a $ b");
    }
}
