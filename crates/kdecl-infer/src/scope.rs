//! Binding scope of one function body.

use crate::constraint::ContainerId;
use rustc_hash::FxHashMap;

/// Maps binding names to their constraint containers.
///
/// One scope per function body, created fresh and discarded after
/// resolution. Scopes do not nest: names from enclosing functions are not
/// visible and are treated as unconstrained.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, ContainerId>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<ContainerId> {
        self.bindings.get(name).copied()
    }

    /// Binds `name`, shadowing any earlier binding of the same name.
    pub fn set(&mut self, name: impl Into<String>, container: ContainerId) {
        self.bindings.insert(name.into(), container);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
