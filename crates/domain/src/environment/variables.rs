//! Environment variable aggregate

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Variable name to value bindings of a single environment, in insertion order.
pub type VariableBindings = IndexMap<String, String>;

/// All environments keyed by name.
///
/// This is the unit that gets persisted: it serializes as a plain JSON
/// object of objects (`{"prod": {"API_URL": "https://x"}}`) and is always
/// written back as a whole. Environments and variables keep insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariablesData {
    environments: IndexMap<String, VariableBindings>,
}

impl VariablesData {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the environment names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.environments.keys().map(String::as_str)
    }

    /// Returns the bindings of an environment, if it exists.
    #[must_use]
    pub fn variables(&self, env: &str) -> Option<&VariableBindings> {
        self.environments.get(env)
    }

    /// Returns true if the environment exists.
    #[must_use]
    pub fn contains(&self, env: &str) -> bool {
        self.environments.contains_key(env)
    }

    /// Returns true if the environment exists and binds `var`.
    #[must_use]
    pub fn contains_variable(&self, env: &str, var: &str) -> bool {
        self.environments
            .get(env)
            .is_some_and(|bindings| bindings.contains_key(var))
    }

    /// Inserts or overwrites an environment with the given bindings.
    pub fn insert(&mut self, env: impl Into<String>, bindings: VariableBindings) {
        self.environments.insert(env.into(), bindings);
    }

    /// Removes an environment and all of its variables.
    pub fn remove(&mut self, env: &str) -> Option<VariableBindings> {
        self.environments.shift_remove(env)
    }

    /// Binds `var` to `value`, creating the environment if needed.
    pub fn set_variable(
        &mut self,
        env: impl Into<String>,
        var: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.environments
            .entry(env.into())
            .or_default()
            .insert(var.into(), value.into());
    }

    /// Removes a single binding. Missing environments are left absent.
    pub fn remove_variable(&mut self, env: &str, var: &str) -> Option<String> {
        self.environments
            .get_mut(env)
            .and_then(|bindings| bindings.shift_remove(var))
    }

    /// Moves all bindings of `old` to `new` and drops `old`.
    ///
    /// An existing `new` environment is overwritten. Returns false, leaving
    /// the aggregate untouched, when `old` does not exist.
    pub fn rename(&mut self, old: &str, new: impl Into<String>) -> bool {
        let new = new.into();
        if old == new {
            return self.contains(old);
        }
        let Some(bindings) = self.environments.shift_remove(old) else {
            return false;
        };
        self.environments.insert(new, bindings);
        true
    }

    /// Empties an environment's bindings, keeping (or creating) the environment.
    pub fn clear(&mut self, env: impl Into<String>) {
        self.environments.insert(env.into(), VariableBindings::new());
    }

    /// Returns the number of environments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Returns true if there are no environments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}
