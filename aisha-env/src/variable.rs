//! Shell variable store (spec.md §3 "Variable store").

use crate::error::{Error, Result};
use enumset::{EnumSet, EnumSetType};
use std::collections::HashMap;

/// Flags a [`Variable`] may carry.
#[derive(EnumSetType, Debug)]
pub enum VariableFlag {
    Exported,
    ReadOnly,
    Integer,
}

/// A single variable's value and flags.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Variable {
    pub value: String,
    pub flags: EnumSet<VariableFlag>,
}

impl Variable {
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Variable {
            value: value.into(),
            flags: EnumSet::empty(),
        }
    }

    #[must_use]
    pub fn exported(mut self) -> Self {
        self.flags |= VariableFlag::Exported;
        self
    }

    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.flags.contains(VariableFlag::Exported)
    }

    #[must_use]
    pub fn is_read_only(&self) -> bool {
        self.flags.contains(VariableFlag::ReadOnly)
    }
}

/// Returns whether `name` is a syntactically valid variable name
/// (spec.md §3: "non-empty, first character letter or `_`, subsequent
/// letters/digits/`_`").
#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The associative store of shell variables, mirroring the process
/// environment for [`Exported`](VariableFlag::Exported) variables.
#[derive(Clone, Debug, Default)]
pub struct VariableSet {
    vars: HashMap<String, Variable>,
}

impl VariableSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Imports the current process environment as a set of exported
    /// variables (spec.md §6 "Environment bridge": "On startup the full
    /// environment is imported as Exported variables").
    pub fn import_from_environment(&mut self) {
        for (name, value) in std::env::vars() {
            if is_valid_name(&name) {
                self.vars.insert(name, Variable::new(value).exported());
            }
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|v| v.value.as_str())
    }

    /// Assigns `value` to `name`, creating the variable if it did not
    /// exist. Mirrors the value into the process environment when the
    /// variable is (or becomes) exported (spec.md §6: "On assignment with
    /// the Exported flag the value is written back through the OS
    /// interface").
    pub fn assign(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        if !is_valid_name(name) {
            return Err(Error::InvalidIdentifier(name.to_owned()));
        }
        if let Some(existing) = self.vars.get(name) {
            if existing.is_read_only() {
                return Err(Error::ReadOnlyVariable(name.to_owned()));
            }
        }
        let value = value.into();
        let entry = self
            .vars
            .entry(name.to_owned())
            .or_insert_with(Variable::default);
        entry.value = value;
        if entry.is_exported() {
            // SAFETY: single-threaded shell process; no other thread reads
            // or writes the environment concurrently.
            unsafe { std::env::set_var(name, &entry.value) };
        }
        Ok(())
    }

    /// Marks `name` exported, creating it empty if unset, and mirrors its
    /// current value into the process environment.
    pub fn export(&mut self, name: &str) -> Result<()> {
        if !is_valid_name(name) {
            return Err(Error::InvalidIdentifier(name.to_owned()));
        }
        let entry = self
            .vars
            .entry(name.to_owned())
            .or_insert_with(Variable::default);
        entry.flags |= VariableFlag::Exported;
        // SAFETY: see assign.
        unsafe { std::env::set_var(name, &entry.value) };
        Ok(())
    }

    pub fn unset(&mut self, name: &str) -> Result<()> {
        if let Some(existing) = self.vars.get(name) {
            if existing.is_read_only() {
                return Err(Error::ReadOnlyVariable(name.to_owned()));
            }
        }
        self.vars.remove(name);
        // SAFETY: see assign.
        unsafe { std::env::remove_var(name) };
        Ok(())
    }

    /// Iterates over exported variables as `(name, value)` pairs, the form
    /// `execve`'s environment array needs.
    pub fn exported_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars
            .iter()
            .filter(|(_, v)| v.is_exported())
            .map(|(k, v)| (k.as_str(), v.value.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Variable)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_names() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("9x"));
        assert!(!is_valid_name("a-b"));
        assert!(is_valid_name("_foo9"));
    }

    #[test]
    fn assign_then_get() {
        let mut vars = VariableSet::new();
        vars.assign("FOO", "bar").unwrap();
        assert_eq!(vars.get_value("FOO"), Some("bar"));
    }

    #[test]
    fn readonly_rejects_reassignment() {
        let mut vars = VariableSet::new();
        vars.assign("FOO", "bar").unwrap();
        vars.vars.get_mut("FOO").unwrap().flags |= VariableFlag::ReadOnly;
        assert!(matches!(
            vars.assign("FOO", "baz"),
            Err(Error::ReadOnlyVariable(_))
        ));
    }
}
