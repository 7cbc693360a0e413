use std::collections::HashMap;

use crate::ast::Number;

/// The variable store of one session.
///
/// Created once when a session starts, mutated by every assignment and kept
/// across top-level evaluations, so later inputs see the variables of earlier
/// ones. Distinct names never share a slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    variables: HashMap<String, Number>,
}

impl Environment {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Number> {
        self.variables.get(name).copied()
    }

    /// Binds `name` to `value`, returning the previous value if any.
    ///
    /// ## Example
    /// ```
    /// use winzig::interpreter::environment::Environment;
    ///
    /// let mut env = Environment::new();
    /// assert_eq!(env.set("x", 1.0), None);
    /// assert_eq!(env.set("x", 2.0), Some(1.0));
    /// assert_eq!(env.get("x"), Some(2.0));
    /// ```
    pub fn set(&mut self, name: &str, value: Number) -> Option<Number> {
        if let Some(slot) = self.variables.get_mut(name) {
            return Some(std::mem::replace(slot, value));
        }
        self.variables.insert(name.to_string(), value);
        None
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// The number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns `true` if no variable is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Removes every binding.
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Iterates over all bindings in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Number)> {
        let mut bindings: Vec<_> = self.variables.iter().map(|(k, v)| (k.as_str(), *v)).collect();
        bindings.sort_unstable_by(|a, b| a.0.cmp(b.0));
        bindings.into_iter()
    }
}
