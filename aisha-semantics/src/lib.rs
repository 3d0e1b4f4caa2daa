//! Expansion and execution engine for the aisha shell (spec.md §4.3-§4.6).
//!
//! This crate takes a validated [`aisha_syntax::List`] (or a raw line, for
//! the expansion passes that run before tokenization) and an [`aisha_env::Env`]
//! and drives real processes: command-position alias expansion, variable
//! interpolation, globbing, redirection, piping, job control, and signal
//! dispatch. It knows nothing of line editing or concrete built-in bodies;
//! those live in `aisha-editor` and `aisha-builtin` respectively.

pub mod builtin;
pub mod executor;
pub mod expansion;
pub mod job_control;
pub mod path;
pub mod redir;

pub use executor::{run_and_or, run_list};
