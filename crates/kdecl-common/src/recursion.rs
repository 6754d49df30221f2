//! Cycle and depth control for recursive walks over the model.
//!
//! A [`RecursionGuard`] remembers which keys are on the current path. The
//! constraint resolver keys it by container id, the heritage walk and alias
//! expansion by qualified name. What a refused entry means is up to the
//! caller: an unresolvable container becomes `Dynamic`, a repeated ancestor
//! is skipped, an alias is left unexpanded.
//!
//! Debug builds panic when a guard is dropped with keys still on its path.

use crate::limits;
use rustc_hash::FxHashSet;
use std::hash::Hash;

/// Which walk a guard protects; picks the limits from [`crate::limits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    ConstraintResolution,
    HeritageWalk,
    AliasExpansion,
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::ConstraintResolution => limits::MAX_CONSTRAINT_RESOLUTION_DEPTH,
            Self::HeritageWalk => limits::MAX_HERITAGE_DEPTH,
            Self::AliasExpansion => limits::MAX_ALIAS_CHAIN_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    pub const fn max_iterations(self) -> u32 {
        if let Self::Custom { max_iterations, .. } = self {
            max_iterations
        } else {
            limits::DEFAULT_MAX_ITERATIONS
        }
    }
}

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// The key is already on the path.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

impl RecursionResult {
    pub fn is_entered(self) -> bool {
        self == Self::Entered
    }

    pub fn is_cycle(self) -> bool {
        self == Self::Cycle
    }
}

pub struct RecursionGuard<K: Hash + Eq + Copy> {
    path: FxHashSet<K>,
    entries: u32,
    profile: RecursionProfile,
    hit_limit: bool,
}

impl<K: Hash + Eq + Copy> RecursionGuard<K> {
    pub fn new(max_depth: u32, max_iterations: u32) -> Self {
        Self::with_profile(RecursionProfile::Custom {
            max_depth,
            max_iterations,
        })
    }

    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self {
            path: FxHashSet::default(),
            entries: 0,
            profile,
            hit_limit: false,
        }
    }

    /// Puts `key` on the path. Every [`RecursionResult::Entered`] must be
    /// paired with a [`leave`](Self::leave) of the same key.
    pub fn enter(&mut self, key: K) -> RecursionResult {
        self.entries = self.entries.saturating_add(1);
        let refused = if self.entries > self.profile.max_iterations() {
            RecursionResult::IterationExceeded
        } else if self.depth() >= self.profile.max_depth() {
            RecursionResult::DepthExceeded
        } else if self.path.insert(key) {
            return RecursionResult::Entered;
        } else {
            return RecursionResult::Cycle;
        };
        self.hit_limit = true;
        refused
    }

    pub fn leave(&mut self, key: K) {
        let removed = self.path.remove(&key);
        debug_assert!(removed, "left a key that was never entered");
    }

    /// Runs `f` with `key` on the path, or returns why it could not be entered.
    pub fn scope<T>(
        &mut self,
        key: K,
        f: impl FnOnce(&mut Self) -> T,
    ) -> Result<T, RecursionResult> {
        match self.enter(key) {
            RecursionResult::Entered => {
                let value = f(self);
                self.leave(key);
                Ok(value)
            }
            refused => Err(refused),
        }
    }

    pub fn depth(&self) -> u32 {
        self.path.len() as u32
    }

    /// True once a depth or iteration limit refused an entry.
    pub fn is_exceeded(&self) -> bool {
        self.hit_limit
    }
}

#[cfg(debug_assertions)]
impl<K: Hash + Eq + Copy> Drop for RecursionGuard<K> {
    fn drop(&mut self) {
        if !self.path.is_empty() && !std::thread::panicking() {
            panic!("recursion guard dropped with {} keys on its path", self.path.len());
        }
    }
}

#[cfg(test)]
#[path = "tests/recursion_tests.rs"]
mod tests;
