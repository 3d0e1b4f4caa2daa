//! Prompt string rendering is an out-of-scope external collaborator
//! (spec.md §1); this is the minimal stand-in the main loop calls, not a
//! themeable prompt engine.

use aisha_env::{Env, System};

/// Renders the prompt shown before reading a line: `$PS1` if set, else a
/// plain `"$ "`.
#[must_use]
pub fn render<S: System>(env: &Env<S>) -> String {
    env.variables
        .get_value("PS1")
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "$ ".to_owned())
}
