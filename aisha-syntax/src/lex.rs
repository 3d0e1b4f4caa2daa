//! Single-pass tokenizer.
//!
//! The tokenizer consumes one already-expanded logical line (the interactive
//! editor joins any embedded newlines before handing a line to this stage;
//! see [`crate::parser::parse_line`]) and produces a flat vector of
//! [`Token`]s terminated by [`TokenKind::Eof`].

use crate::error::TokenizerError;
use crate::location::Location;
use crate::token::{Token, TokenKind};

/// Minimum guaranteed length of a single [`Word`](TokenKind::Word) token,
/// per spec ("at least 4096 bytes").
pub const MAX_WORD_LEN: usize = 4096;

/// Minimum guaranteed number of tokens accepted on one line, per spec
/// ("at least 1024").
pub const MAX_TOKENS: usize = 1024;

/// Tokenizes `line` into a vector of tokens ending in [`TokenKind::Eof`].
pub fn tokenize(line: &str) -> Result<Vec<Token>, TokenizerError> {
    let bytes = line.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut pos = 0usize;

    loop {
        while pos < len && is_blank(bytes[pos]) {
            pos += 1;
        }

        if pos >= len {
            tokens.push(Token::new(TokenKind::Eof, Location::at(pos)));
            return Ok(tokens);
        }

        if bytes[pos] == b'#' {
            tokens.push(Token::new(TokenKind::Eof, Location::at(len)));
            return Ok(tokens);
        }

        if let Some((kind, width)) = match_operator(&bytes[pos..]) {
            push_token(&mut tokens, Token::new(kind, Location::at(pos)))?;
            pos += width;
            continue;
        }

        let start = pos;
        let (text, quoted, end) = scan_word(bytes, pos)?;
        push_token(&mut tokens, Token::word(text, Location::at(start), quoted))?;
        pos = end;
    }
}

fn push_token(tokens: &mut Vec<Token>, token: Token) -> Result<(), TokenizerError> {
    if tokens.len() >= MAX_TOKENS {
        return Err(TokenizerError::TooManyTokens);
    }
    tokens.push(token);
    Ok(())
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn is_operator_lead(b: u8) -> bool {
    matches!(
        b,
        b'|' | b'&' | b';' | b'<' | b'>' | b'(' | b')'
    )
}

/// Longest-match recognition of the operators enumerated in spec.md §6.
fn match_operator(bytes: &[u8]) -> Option<(TokenKind, usize)> {
    macro_rules! try_lit {
        ($lit:expr, $kind:expr) => {
            if bytes.starts_with($lit) {
                return Some(($kind, $lit.len()));
            }
        };
    }
    try_lit!(b"<<<", TokenKind::HereString);
    try_lit!(b"&&", TokenKind::And);
    try_lit!(b"||", TokenKind::Or);
    try_lit!(b"<<", TokenKind::Heredoc);
    try_lit!(b">>", TokenKind::OutputAppend);
    try_lit!(b"|", TokenKind::Pipe);
    try_lit!(b"&", TokenKind::Ampersand);
    try_lit!(b";", TokenKind::Semicolon);
    try_lit!(b"<", TokenKind::InputRedirect);
    try_lit!(b">", TokenKind::OutputRedirect);
    try_lit!(b"(", TokenKind::LParen);
    try_lit!(b")", TokenKind::RParen);
    None
}

/// Scans one [`Word`](TokenKind::Word) starting at `start`, concatenating
/// any run of quoted and unquoted fragments uninterrupted by whitespace.
/// Returns the decoded text, whether any part of it came from a quote or
/// backslash escape, and the byte offset just past the word.
fn scan_word(bytes: &[u8], start: usize) -> Result<(String, bool, usize), TokenizerError> {
    let len = bytes.len();
    let mut text = String::new();
    let mut quoted = false;
    let mut i = start;

    loop {
        if i >= len {
            break;
        }
        let c = bytes[i];
        if c == b'\'' {
            quoted = true;
            i += 1;
            let close = memchr(bytes, b'\'', i).ok_or(TokenizerError::UnterminatedQuote(
                Location::at(start),
            ))?;
            text.push_str(std::str::from_utf8(&bytes[i..close]).unwrap_or(""));
            i = close + 1;
        } else if c == b'"' {
            quoted = true;
            i += 1;
            loop {
                if i >= len {
                    return Err(TokenizerError::UnterminatedQuote(Location::at(start)));
                }
                let c2 = bytes[i];
                if c2 == b'"' {
                    i += 1;
                    break;
                } else if c2 == b'\\' {
                    if i + 1 >= len {
                        text.push('\\');
                        i += 1;
                    } else {
                        let next = bytes[i + 1];
                        match next {
                            b'n' => text.push('\n'),
                            b't' => text.push('\t'),
                            b'r' => text.push('\r'),
                            b'\\' => text.push('\\'),
                            b'"' => text.push('"'),
                            b'$' => text.push('$'),
                            b'`' => text.push('`'),
                            _ => {
                                text.push('\\');
                                text.push(next as char);
                            }
                        }
                        i += 2;
                    }
                } else {
                    text.push(c2 as char);
                    i += 1;
                }
                if text.len() > MAX_WORD_LEN {
                    return Err(TokenizerError::WordTooLong(Location::at(start)));
                }
            }
        } else if c == b'\\' {
            quoted = true;
            if i + 1 >= len {
                text.push('\\');
                i += 1;
            } else {
                text.push(bytes[i + 1] as char);
                i += 2;
            }
        } else if is_blank(c) || c == b'#' || is_operator_lead(c) {
            break;
        } else {
            text.push(c as char);
            i += 1;
        }

        if text.len() > MAX_WORD_LEN {
            return Err(TokenizerError::WordTooLong(Location::at(start)));
        }
    }

    Ok((text, quoted, i))
}

fn memchr(haystack: &[u8], needle: u8, from: usize) -> Option<usize> {
    haystack[from..].iter().position(|&b| b == needle).map(|i| i + from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        tokenize(line)
            .unwrap()
            .into_iter()
            .filter_map(|t| t.as_word().map(str::to_owned))
            .collect()
    }

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(words("echo  foo   bar"), vec!["echo", "foo", "bar"]);
    }

    #[test]
    fn single_quotes_are_literal() {
        assert_eq!(words("echo 'a b\\c'"), vec!["echo", "a b\\c"]);
    }

    #[test]
    fn double_quote_escapes() {
        assert_eq!(words("echo \"a\\tb\""), vec!["echo", "a\tb"]);
        assert_eq!(words("echo \"a\\qb\""), vec!["echo", "a\\qb"]);
    }

    #[test]
    fn adjacent_fragments_concatenate() {
        assert_eq!(words("echo foo'bar'baz"), vec!["echo", "foobarbaz"]);
    }

    #[test]
    fn unterminated_quote_fails() {
        assert_eq!(
            tokenize("echo 'unterminated").unwrap_err(),
            TokenizerError::UnterminatedQuote(Location::at(5))
        );
    }

    #[test]
    fn comment_consumes_to_end() {
        let tokens = tokenize("echo foo # bar baz").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word("echo".into()),
                TokenKind::Word("foo".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn operators_longest_match() {
        let tokens = tokenize("a<<<b").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Word("a".into()),
                TokenKind::HereString,
                TokenKind::Word("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn too_many_tokens_fails() {
        let line = "a ".repeat(MAX_TOKENS + 10);
        assert_eq!(tokenize(&line).unwrap_err(), TokenizerError::TooManyTokens);
    }
}
