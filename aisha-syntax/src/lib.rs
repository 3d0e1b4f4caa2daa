//! Tokenizer, grammar validator, and command-tree builder for the aisha
//! shell's core execution engine (spec.md §4.1, §4.2, §4.4).
//!
//! This crate has no knowledge of processes, variables, or the terminal; it
//! only turns one already-expanded line of text into a [`ast::List`] the
//! executor in `aisha-semantics` can run. Alias and variable expansion run
//! on the raw line *before* it reaches this crate (spec.md §4.3, §5
//! "Ordering guarantees").

pub mod ast;
pub mod error;
pub mod lex;
pub mod location;
pub mod parser;
pub mod token;

pub use ast::{AndOrList, AndOrOp, Command, List, ListItem, OutputRedirection, Pipeline, SimpleCommand};
pub use error::{ParseError, RedirectionError, SyntaxError, SyntaxErrorKind, TokenizerError};
pub use location::Location;
pub use parser::parse_line;
pub use token::{Token, TokenKind};
