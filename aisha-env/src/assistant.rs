//! Seam for the AI helper client (out of scope per spec.md §1: "An AI
//! helper client that may suggest completions or corrections"). This
//! crate defines only the narrow trait the rest of the workspace compiles
//! against; no networked implementation ships here.

/// A source of suggestions external to the core interpreter. Nothing in
/// `aisha-env`, `aisha-semantics`, or `aisha-editor` depends on a specific
/// implementation beyond this trait.
pub trait AssistantClient {
    /// Returns zero or more suggested completions or corrections for the
    /// current input line, or an empty vector if the assistant has
    /// nothing to offer (including: there is no assistant).
    fn suggest(&self, line: &str) -> Vec<String>;
}

/// The assistant that never suggests anything, used as the default when
/// no real client is configured and in tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAssistant;

impl AssistantClient for NullAssistant {
    fn suggest(&self, _line: &str) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_assistant_suggests_nothing() {
        assert!(NullAssistant.suggest("ls -").is_empty());
    }
}
