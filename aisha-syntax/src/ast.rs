//! Command tree produced by the [command builder](crate::parser::build).
//!
//! These types are transient: built fresh for one line, executed, then
//! dropped (spec.md §3 "Lifecycle"). They intentionally carry only the data
//! the executor needs, not source locations — diagnostics for a tree that
//! already passed grammar validation are not needed.

/// Output redirection: which file and whether to append or truncate.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputRedirection {
    pub file: String,
    pub append: bool,
}

/// A single executable leaf of a pipeline.
///
/// Per spec.md §4.4, multiple input redirections on one command keep only
/// the last; multiple output redirections keep the last together with its
/// kind (truncate vs. append).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SimpleCommand {
    pub args: Vec<String>,
    /// Parallel to `args`: whether the corresponding argument came from a
    /// quoted or backslash-escaped fragment (spec.md §4.3: glob expansion
    /// runs only over "each *unquoted* Word token"). Always the same
    /// length as `args`.
    pub arg_quoted: Vec<bool>,
    pub input: Option<String>,
    pub output: Option<OutputRedirection>,
}

impl SimpleCommand {
    #[must_use]
    pub fn new(args: Vec<String>) -> Self {
        let arg_quoted = vec![false; args.len()];
        SimpleCommand {
            args,
            arg_quoted,
            input: None,
            output: None,
        }
    }
}

/// One stage of a [`Pipeline`].
///
/// A stage is either a simple command or a parenthesized subshell group.
/// The formal grammar in spec.md §4.2 is silent on `(` `)`, but spec.md
/// §4.1 lexes them and §4.5 defines subshell execution semantics; this
/// crate resolves that gap by admitting a subshell wherever a simple
/// command is admitted (see `DESIGN.md`, "parenthesized groups").
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Simple(SimpleCommand),
    Subshell(Box<List>),
}

/// An ordered sequence of [`Command`]s connected by pipes.
///
/// Invariant: `stages` is never empty. Only `stages[0]` may carry an input
/// redirection consumed from the token stream, and only the last stage may
/// carry an output redirection; the command builder enforces this while
/// folding tokens (earlier/later redirections on the wrong stage are a
/// syntax error, since the grammar only allows a `redir` directly after the
/// command it decorates).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pipeline {
    pub stages: Vec<Command>,
}

impl Pipeline {
    #[must_use]
    pub fn single(command: Command) -> Self {
        Pipeline {
            stages: vec![command],
        }
    }
}

/// The `&&` / `||` connective between two pipelines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AndOrOp {
    And,
    Or,
}

/// A left-to-right chain of pipelines joined by `&&`/`||`, all binding with
/// equal precedence (spec.md §3 "List").
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AndOrList {
    pub first: Pipeline,
    pub rest: Vec<(AndOrOp, Pipeline)>,
}

impl AndOrList {
    #[must_use]
    pub fn single(pipeline: Pipeline) -> Self {
        AndOrList {
            first: pipeline,
            rest: Vec::new(),
        }
    }
}

/// One element of a [`List`]: an and-or chain plus whether its trailing
/// separator was `&` (background) rather than `;` (sequential).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ListItem {
    pub and_or: AndOrList,
    pub background: bool,
}

/// A whole parsed line: a sequence of [`ListItem`]s.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct List {
    pub items: Vec<ListItem>,
}
