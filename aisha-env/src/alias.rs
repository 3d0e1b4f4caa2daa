//! Alias store and substitution loop (spec.md §3 "Alias store", §4.3
//! "Alias expansion pass").

use std::collections::{HashMap, HashSet};

/// A single alias definition.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Alias {
    pub name: String,
    pub replacement: String,
}

/// The set of defined aliases, keyed by name.
#[derive(Clone, Debug, Default)]
pub struct AliasSet {
    aliases: HashMap<String, Alias>,
}

impl AliasSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, replacement: impl Into<String>) {
        let name = name.into();
        self.aliases.insert(
            name.clone(),
            Alias {
                name,
                replacement: replacement.into(),
            },
        );
    }

    pub fn remove(&mut self, name: &str) -> Option<Alias> {
        self.aliases.remove(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.aliases.values()
    }

    /// Substitutes `word` if it names an alias, per spec.md §4.3: only the
    /// command-position word is a candidate, and the replacement text is
    /// re-scanned for a further leading-word alias so `alias ll='la -l'`
    /// followed by `alias la='ls -a'` expands `ll` all the way to
    /// `ls -a -l`. A name that would be substituted again after already
    /// appearing in the chain is left alone, so `alias ls='ls --color'`
    /// reaches a fixed point instead of looping forever.
    #[must_use]
    pub fn expand_leading_word<'a>(&self, word: &'a str) -> std::borrow::Cow<'a, str> {
        let Some(alias) = self.aliases.get(word) else {
            return std::borrow::Cow::Borrowed(word);
        };
        let mut text = alias.replacement.clone();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(word);
        loop {
            let leading = text.split_whitespace().next().unwrap_or("");
            if leading.is_empty() || seen.contains(leading) {
                break;
            }
            let Some(next_alias) = self.aliases.get(leading) else {
                break;
            };
            seen.insert(&next_alias.name);
            let rest = text[leading.len()..].to_owned();
            text = format!("{}{}", next_alias.replacement, rest);
        }
        std::borrow::Cow::Owned(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_simple_alias() {
        let mut aliases = AliasSet::new();
        aliases.define("ll", "ls -l");
        assert_eq!(aliases.expand_leading_word("ll"), "ls -l");
    }

    #[test]
    fn non_alias_passes_through() {
        let aliases = AliasSet::new();
        assert_eq!(aliases.expand_leading_word("ls"), "ls");
    }

    #[test]
    fn self_alias_does_not_loop() {
        let mut aliases = AliasSet::new();
        aliases.define("ls", "ls --color");
        assert_eq!(aliases.expand_leading_word("ls"), "ls --color");
    }

    #[test]
    fn chained_alias_reaches_fixed_point() {
        let mut aliases = AliasSet::new();
        aliases.define("ll", "la -l");
        aliases.define("la", "ls -a");
        assert_eq!(aliases.expand_leading_word("ll"), "ls -a -l");
    }
}
