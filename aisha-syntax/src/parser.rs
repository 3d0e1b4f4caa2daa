//! Grammar validator and command-tree builder.
//!
//! Spec.md keeps these as two conceptually separate passes: §4.2's
//! validator walks the token stream without allocating and only ever
//! answers pass/fail, while §4.4's builder folds an already-accepted token
//! stream into the [`List`] tree. This module keeps that split as two
//! functions, [`validate`] and [`build`], both driven by the same
//! recursive-descent grammar:
//!
//! ```text
//! list      := andor ((';' | '&') andor)* (';' | '&')?
//! andor     := pipeline (('&&' | '||') pipeline)*
//! pipeline  := command ('|' command)*
//! command   := Word (Word | redir)* | '(' list ')'
//! redir     := ('<' | '>' | '>>') Word
//! ```
//!
//! The `'(' list ')'` alternative in `command` is this crate's resolution
//! of a gap in spec.md: §4.1 lexes `(`/`)` and §4.5 defines subshell
//! execution, but the grammar quoted in §4.2 never mentions parentheses.
//! See `DESIGN.md` for the recorded decision.

use crate::ast::{AndOrList, AndOrOp, Command, List, ListItem, OutputRedirection, Pipeline, SimpleCommand};
use crate::error::{ParseError, RedirectionError, SyntaxError, SyntaxErrorKind};
use crate::lex::tokenize;
use crate::token::{Token, TokenKind};
use std::fs::OpenOptions;

/// Tokenizes, validates, and builds `line`, then pre-flights every
/// redirection's target file. This is the single entry point callers
/// (the main loop, `source`, `!N` history re-execution) should use.
pub fn parse_line(line: &str) -> Result<List, ParseError> {
    let tokens = tokenize(line)?;
    validate(&tokens)?;
    let list = build(tokens);
    preflight_redirections(&list)?;
    Ok(list)
}

/// Runs the grammar validator alone (spec.md §4.2). Allocates nothing
/// beyond the call stack.
pub fn validate(tokens: &[Token]) -> Result<(), SyntaxError> {
    let mut i = 0usize;
    validate_list(tokens, &mut i)?;
    if !matches!(tokens[i].kind, TokenKind::Eof) {
        return Err(SyntaxError::new(SyntaxErrorKind::TrailingTokens, tokens[i].location));
    }
    Ok(())
}

fn validate_list(tokens: &[Token], i: &mut usize) -> Result<(), SyntaxError> {
    validate_andor(tokens, i)?;
    loop {
        match tokens[*i].kind {
            TokenKind::Semicolon | TokenKind::Ampersand => {
                let sep_loc = tokens[*i].location;
                *i += 1;
                match tokens[*i].kind {
                    TokenKind::Eof | TokenKind::RParen => break,
                    TokenKind::Word(_) | TokenKind::LParen => validate_andor(tokens, i)?,
                    _ => {
                        return Err(SyntaxError::new(SyntaxErrorKind::RepeatedOperator, sep_loc));
                    }
                }
            }
            _ => break,
        }
    }
    Ok(())
}

fn validate_andor(tokens: &[Token], i: &mut usize) -> Result<(), SyntaxError> {
    validate_pipeline(tokens, i)?;
    loop {
        match tokens[*i].kind {
            TokenKind::And | TokenKind::Or => {
                *i += 1;
                validate_pipeline(tokens, i)?;
            }
            _ => break,
        }
    }
    Ok(())
}

fn validate_pipeline(tokens: &[Token], i: &mut usize) -> Result<(), SyntaxError> {
    validate_command(tokens, i)?;
    loop {
        match tokens[*i].kind {
            TokenKind::Pipe => {
                let loc = tokens[*i].location;
                *i += 1;
                match tokens[*i].kind {
                    TokenKind::Word(_) | TokenKind::LParen => validate_command(tokens, i)?,
                    _ => {
                        return Err(SyntaxError::new(
                            SyntaxErrorKind::PipeWithoutRightHandSide,
                            loc,
                        ));
                    }
                }
            }
            _ => break,
        }
    }
    Ok(())
}

fn validate_command(tokens: &[Token], i: &mut usize) -> Result<(), SyntaxError> {
    match &tokens[*i].kind {
        TokenKind::LParen => {
            let loc = tokens[*i].location;
            *i += 1;
            validate_list(tokens, i)?;
            match tokens[*i].kind {
                TokenKind::RParen => *i += 1,
                _ => return Err(SyntaxError::new(SyntaxErrorKind::UnmatchedParenthesis, loc)),
            }
        }
        TokenKind::Word(_) => {
            *i += 1;
            loop {
                match &tokens[*i].kind {
                    TokenKind::Word(_) => *i += 1,
                    kind if is_redirection_kind(kind) => {
                        let loc = tokens[*i].location;
                        *i += 1;
                        match tokens[*i].kind {
                            TokenKind::Word(_) => *i += 1,
                            _ => {
                                return Err(SyntaxError::new(
                                    SyntaxErrorKind::RedirectionWithoutTarget,
                                    loc,
                                ));
                            }
                        }
                    }
                    _ => break,
                }
            }
        }
        _ => {
            return Err(SyntaxError::new(
                SyntaxErrorKind::LeadingOperator,
                tokens[*i].location,
            ));
        }
    }
    Ok(())
}

fn is_redirection_kind(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::InputRedirect
            | TokenKind::OutputRedirect
            | TokenKind::OutputAppend
            | TokenKind::Heredoc
            | TokenKind::HereString
    )
}

/// Folds an already-validated token stream into a [`List`] (spec.md §4.4).
/// Callers must have run [`validate`] first; this function trusts the
/// grammar and does not re-check it.
#[must_use]
pub fn build(tokens: Vec<Token>) -> List {
    let mut i = 0usize;
    build_list(&tokens, &mut i)
}

fn build_list(tokens: &[Token], i: &mut usize) -> List {
    let mut items = Vec::new();
    let mut and_or = build_andor(tokens, i);
    loop {
        match tokens[*i].kind {
            TokenKind::Semicolon | TokenKind::Ampersand => {
                let background = matches!(tokens[*i].kind, TokenKind::Ampersand);
                *i += 1;
                items.push(ListItem { and_or, background });
                match tokens[*i].kind {
                    TokenKind::Eof | TokenKind::RParen => return List { items },
                    _ => and_or = build_andor(tokens, i),
                }
            }
            _ => {
                items.push(ListItem {
                    and_or,
                    background: false,
                });
                return List { items };
            }
        }
    }
}

fn build_andor(tokens: &[Token], i: &mut usize) -> AndOrList {
    let first = build_pipeline(tokens, i);
    let mut rest = Vec::new();
    loop {
        match tokens[*i].kind {
            TokenKind::And => {
                *i += 1;
                rest.push((AndOrOp::And, build_pipeline(tokens, i)));
            }
            TokenKind::Or => {
                *i += 1;
                rest.push((AndOrOp::Or, build_pipeline(tokens, i)));
            }
            _ => break,
        }
    }
    AndOrList { first, rest }
}

fn build_pipeline(tokens: &[Token], i: &mut usize) -> Pipeline {
    let mut stages = vec![build_command(tokens, i)];
    loop {
        match tokens[*i].kind {
            TokenKind::Pipe => {
                *i += 1;
                stages.push(build_command(tokens, i));
            }
            _ => break,
        }
    }
    Pipeline { stages }
}

fn build_command(tokens: &[Token], i: &mut usize) -> Command {
    if matches!(tokens[*i].kind, TokenKind::LParen) {
        *i += 1;
        let list = build_list(tokens, i);
        if matches!(tokens[*i].kind, TokenKind::RParen) {
            *i += 1;
        }
        return Command::Subshell(Box::new(list));
    }

    let mut args = Vec::new();
    let mut arg_quoted = Vec::new();
    let mut input = None;
    let mut output = None;
    loop {
        match &tokens[*i].kind {
            TokenKind::Word(text) => {
                args.push(text.clone());
                arg_quoted.push(tokens[*i].quoted);
                *i += 1;
            }
            TokenKind::InputRedirect => {
                *i += 1;
                if let TokenKind::Word(text) = &tokens[*i].kind {
                    input = Some(text.clone());
                    *i += 1;
                }
            }
            TokenKind::OutputRedirect => {
                *i += 1;
                if let TokenKind::Word(text) = &tokens[*i].kind {
                    output = Some(OutputRedirection {
                        file: text.clone(),
                        append: false,
                    });
                    *i += 1;
                }
            }
            TokenKind::OutputAppend => {
                *i += 1;
                if let TokenKind::Word(text) = &tokens[*i].kind {
                    output = Some(OutputRedirection {
                        file: text.clone(),
                        append: true,
                    });
                    *i += 1;
                }
            }
            TokenKind::Heredoc | TokenKind::HereString => {
                // Lexed per spec.md §6 but heredoc/here-string bodies are
                // out of scope; skip the operator and its target word.
                *i += 1;
                if matches!(tokens[*i].kind, TokenKind::Word(_)) {
                    *i += 1;
                }
            }
            _ => break,
        }
    }
    Command::Simple(SimpleCommand { args, arg_quoted, input, output })
}

/// Opens (and immediately closes) every redirection target named in `list`,
/// in the modes spec.md §6 specifies, failing the whole line with no
/// partial effects if any open fails (spec.md §4.4).
fn preflight_redirections(list: &List) -> Result<(), RedirectionError> {
    for item in &list.items {
        preflight_andor(&item.and_or)?;
    }
    Ok(())
}

fn preflight_andor(and_or: &AndOrList) -> Result<(), RedirectionError> {
    preflight_pipeline(&and_or.first)?;
    for (_, pipeline) in &and_or.rest {
        preflight_pipeline(pipeline)?;
    }
    Ok(())
}

fn preflight_pipeline(pipeline: &Pipeline) -> Result<(), RedirectionError> {
    for command in &pipeline.stages {
        preflight_command(command)?;
    }
    Ok(())
}

fn preflight_command(command: &Command) -> Result<(), RedirectionError> {
    match command {
        Command::Subshell(list) => preflight_redirections(list),
        Command::Simple(simple) => {
            if let Some(file) = &simple.input {
                OpenOptions::new()
                    .read(true)
                    .open(file)
                    .map_err(|source| RedirectionError {
                        file: file.clone(),
                        action: "No such file or unable to open",
                        source,
                    })?;
            }
            if let Some(output) = &simple.output {
                let mut options = OpenOptions::new();
                options.write(true).create(true);
                if output.append {
                    options.append(true);
                } else {
                    options.truncate(true);
                }
                #[cfg(unix)]
                {
                    use std::os::unix::fs::OpenOptionsExt;
                    options.mode(0o644);
                }
                options.open(&output.file).map_err(|source| RedirectionError {
                    file: output.file.clone(),
                    action: "Unable to create",
                    source,
                })?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> List {
        let tokens = tokenize(line).unwrap();
        validate(&tokens).unwrap();
        build(tokens)
    }

    #[test]
    fn simple_command() {
        let list = parse("echo hello world");
        assert_eq!(list.items.len(), 1);
        let first = &list.items[0].and_or.first.stages[0];
        match first {
            Command::Simple(c) => assert_eq!(c.args, vec!["echo", "hello", "world"]),
            _ => panic!("expected simple command"),
        }
    }

    #[test]
    fn pipeline_and_andor() {
        let list = parse("a | b && c || d");
        let ao = &list.items[0].and_or;
        assert_eq!(ao.first.stages.len(), 2);
        assert_eq!(ao.rest.len(), 2);
        assert_eq!(ao.rest[0].0, AndOrOp::And);
        assert_eq!(ao.rest[1].0, AndOrOp::Or);
    }

    #[test]
    fn trailing_ampersand_backgrounds_last_item() {
        let list = parse("sleep 10 &");
        assert_eq!(list.items.len(), 1);
        assert!(list.items[0].background);
    }

    #[test]
    fn semicolon_separated_list() {
        let list = parse("false && echo a ; echo b || echo c");
        assert_eq!(list.items.len(), 2);
        assert!(!list.items[0].background);
        assert!(!list.items[1].background);
    }

    #[test]
    fn rejects_pipe_without_rhs() {
        let tokens = tokenize("echo a |").unwrap();
        assert_eq!(
            validate(&tokens).unwrap_err().kind,
            SyntaxErrorKind::PipeWithoutRightHandSide
        );
    }

    #[test]
    fn rejects_leading_operator() {
        let tokens = tokenize("| echo a").unwrap();
        assert_eq!(
            validate(&tokens).unwrap_err().kind,
            SyntaxErrorKind::LeadingOperator
        );
    }

    #[test]
    fn rejects_redirection_without_target() {
        let tokens = tokenize("echo a >").unwrap();
        assert_eq!(
            validate(&tokens).unwrap_err().kind,
            SyntaxErrorKind::RedirectionWithoutTarget
        );
    }

    #[test]
    fn subshell_group_round_trips() {
        let list = parse("(echo a; echo b) | wc -l");
        let stage0 = &list.items[0].and_or.first.stages[0];
        assert!(matches!(stage0, Command::Subshell(_)));
    }
}
