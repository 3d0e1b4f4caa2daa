//! Tokens produced by the [lexer](crate::lex).

use crate::location::Location;

/// Variant of a single lexical token.
///
/// This mirrors the token set enumerated in the shell grammar: operators are
/// their own variants rather than generic "operator" words carrying a string,
/// since the grammar validator and command builder both dispatch on them by
/// variant.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TokenKind {
    /// An argument, command name, or redirection target.
    Word(String),
    Pipe,
    Semicolon,
    Ampersand,
    And,
    Or,
    InputRedirect,
    OutputRedirect,
    OutputAppend,
    /// `<<`, lexed but not executed (heredoc bodies are out of scope).
    Heredoc,
    /// `<<<`, lexed but not executed (here-strings are out of scope).
    HereString,
    LParen,
    RParen,
    /// Only ever produced if the raw line still contains an embedded
    /// newline; the interactive editor normally hands the tokenizer a
    /// single already-joined logical line.
    Newline,
    Eof,
}

/// A single token together with where it started in the source line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: Location,
    /// Whether a [`Word`](TokenKind::Word) token's text came from inside a
    /// quoted literal (single- or double-quoted, or a backslash-escaped
    /// character). Consulted by the glob expander (spec.md §4.3: expansion
    /// runs only over "each unquoted Word token") and, per spec, has no
    /// other effect (this shell does not otherwise word-split).
    pub quoted: bool,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind, location: Location) -> Self {
        Token {
            kind,
            location,
            quoted: false,
        }
    }

    #[must_use]
    pub fn word(text: String, location: Location, quoted: bool) -> Self {
        Token {
            kind: TokenKind::Word(text),
            location,
            quoted,
        }
    }

    #[must_use]
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Word(_))
    }

    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Word(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this token is a redirection operator (`<`, `>`, `>>`, `<<`,
    /// or `<<<`).
    #[must_use]
    pub fn is_redirection_operator(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::InputRedirect
                | TokenKind::OutputRedirect
                | TokenKind::OutputAppend
                | TokenKind::Heredoc
                | TokenKind::HereString
        )
    }
}
