//! The global variable environment.
//!
//! SPL has a single flat scope: loop bodies and `if` branches read and
//! write the same environment as top-level code, and loop variables
//! remain defined after the loop ends.

use crate::value::Value;
use std::collections::BTreeMap;

/// A flat name-to-value map. Ordered so snapshots list variables
/// deterministically.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: BTreeMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a name, creating or overwriting it.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.vars.insert(name.into(), value);
    }

    /// Look up a name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    /// Returns `true` if the name is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Clone the current bindings.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.vars.clone()
    }

    /// Remove all bindings.
    pub fn clear(&mut self) {
        self.vars.clear();
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}
