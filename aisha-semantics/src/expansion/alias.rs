//! Line-level alias substitution (spec.md §4.3 "Alias pass").
//!
//! [`aisha_env::AliasSet::expand_leading_word`] already does the per-word
//! fixed-point rescanning; this module is the part spec.md leaves to "a
//! stronger implementation": finding every *command-position* word on the
//! line, not just the very first one, so `true && ll` expands `ll` too.
//! Command position is the start of the line and the start of every segment
//! following `;`, `&`, `|`, `&&`, `||`, or `(`.

use aisha_env::AliasSet;

/// Expands aliases at every command-position word of `line`.
#[must_use]
pub fn expand_line(line: &str, aliases: &AliasSet) -> String {
    let mut result = String::with_capacity(line.len());
    let mut rest = line;
    let mut command_position = true;

    while !rest.is_empty() {
        let ws_len = rest.len() - rest.trim_start_matches([' ', '\t']).len();
        result.push_str(&rest[..ws_len]);
        rest = &rest[ws_len..];
        if rest.is_empty() {
            break;
        }

        if command_position {
            let word_len = word_length(rest);
            if word_len > 0 {
                let word = &rest[..word_len];
                result.push_str(&aliases.expand_leading_word(word));
                rest = &rest[word_len..];
                command_position = false;
                continue;
            }
        }

        if let Some((op, resets)) = match_separator(rest) {
            result.push_str(op);
            rest = &rest[op.len()..];
            command_position = resets;
            continue;
        }

        let ch_len = rest.chars().next().map(char::len_utf8).unwrap_or(1);
        result.push_str(&rest[..ch_len]);
        rest = &rest[ch_len..];
        command_position = false;
    }

    result
}

/// Length of one raw word (quotes kept intact) starting at `s`, stopping at
/// unquoted whitespace or an operator-leading byte.
fn word_length(s: &str) -> usize {
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0;
    while i < len {
        match bytes[i] {
            b' ' | b'\t' => break,
            b'|' | b'&' | b';' | b'<' | b'>' | b'(' | b')' => break,
            b'\'' => {
                i += 1;
                while i < len && bytes[i] != b'\'' {
                    i += 1;
                }
                if i < len {
                    i += 1;
                }
            }
            b'"' => {
                i += 1;
                while i < len && bytes[i] != b'"' {
                    if bytes[i] == b'\\' && i + 1 < len {
                        i += 1;
                    }
                    i += 1;
                }
                if i < len {
                    i += 1;
                }
            }
            b'\\' => {
                i += 1;
                if i < len {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }
    i
}

/// Recognizes a separator at the start of `s`, returning the matched text
/// and whether it puts the next word back into command position. `)` does
/// not reset command position (what follows a subshell close is an operand
/// or another operator, not a command).
fn match_separator(s: &str) -> Option<(&str, bool)> {
    if s.starts_with("&&") {
        Some((&s[..2], true))
    } else if s.starts_with("||") {
        Some((&s[..2], true))
    } else if s.starts_with(';') || s.starts_with('&') || s.starts_with('|') || s.starts_with('(') {
        Some((&s[..1], true))
    } else if s.starts_with(')') {
        Some((&s[..1], false))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_first_word() {
        let mut aliases = AliasSet::new();
        aliases.define("ll", "ls -la");
        assert_eq!(expand_line("ll /tmp", &aliases), "ls -la /tmp");
    }

    #[test]
    fn expands_after_semicolon_and_andor() {
        let mut aliases = AliasSet::new();
        aliases.define("ll", "ls -la");
        assert_eq!(
            expand_line("true ; ll && ll", &aliases),
            "true ; ls -la && ls -la"
        );
    }

    #[test]
    fn does_not_expand_non_command_position_word() {
        let mut aliases = AliasSet::new();
        aliases.define("ll", "ls -la");
        assert_eq!(expand_line("echo ll", &aliases), "echo ll");
    }

    #[test]
    fn expands_inside_subshell() {
        let mut aliases = AliasSet::new();
        aliases.define("ll", "ls -la");
        assert_eq!(expand_line("(ll)", &aliases), "(ls -la)");
    }
}
