//! Constraint containers and the arena that owns them.
//!
//! A container accumulates the evidence observed for one binding. Containers
//! live in a per-function [`ConstraintArena`] and are referred to by
//! [`ContainerId`], so several bindings (and call evidence) can share one
//! container without reference counting. The arena is dropped together with
//! the function's scope once its signature is resolved.

use kdecl_common::{RecursionGuard, RecursionProfile, RecursionResult};
use kdecl_model::{TypeExpr, well_known};
use smallvec::SmallVec;
use tracing::trace;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

impl ContainerId {
    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One piece of type evidence.
#[derive(Clone, Debug, PartialEq)]
pub enum Constraint {
    Number,
    String,
    Boolean,
    Unit,
    /// `null` or `undefined` flowed into the binding.
    Nullable,
    /// The binding was used as an object (property or element access).
    PropertyOwner,
    /// The type is known outright (declared type, `new C()`).
    Known(TypeExpr),
    /// The binding was called.
    Call {
        arguments: SmallVec<[ContainerId; 4]>,
        result: ContainerId,
    },
    /// A function value whose body is not analyzed.
    Callable { arity: usize },
    /// An array whose elements carry the evidence of `element`.
    ArrayOf { element: ContainerId },
}

#[derive(Clone, Debug, Default)]
pub struct ConstraintContainer {
    constraints: Vec<Constraint>,
}

impl ConstraintContainer {
    /// Records `constraint` unless an equal one is already present.
    pub fn add(&mut self, constraint: Constraint) {
        if !self.constraints.contains(&constraint) {
            self.constraints.push(constraint);
        }
    }

    pub fn has(&self, constraint: &Constraint) -> bool {
        self.constraints.contains(constraint)
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

/// Evidence for a function's return type.
///
/// Holds at most one container; a later `return` replaces an earlier one.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReturnConstraintContainer {
    evidence: Option<ContainerId>,
}

impl ReturnConstraintContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_evidence(evidence: ContainerId) -> Self {
        Self {
            evidence: Some(evidence),
        }
    }

    pub fn evidence(&self) -> Option<ContainerId> {
        self.evidence
    }

    pub fn resolve_to_type(&self, arena: &ConstraintArena) -> TypeExpr {
        match self.evidence {
            Some(id) => arena.resolve_to_type(id),
            None => TypeExpr::Dynamic,
        }
    }
}

#[derive(Debug, Default)]
pub struct ConstraintArena {
    containers: Vec<ConstraintContainer>,
}

impl ConstraintArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates an empty (unconstrained) container.
    pub fn alloc(&mut self) -> ContainerId {
        let id = ContainerId(self.containers.len() as u32);
        self.containers.push(ConstraintContainer::default());
        id
    }

    pub fn alloc_with(&mut self, constraint: Constraint) -> ContainerId {
        let id = self.alloc();
        self.add(id, constraint);
        id
    }

    pub fn get(&self, id: ContainerId) -> &ConstraintContainer {
        &self.containers[id.index()]
    }

    pub fn add(&mut self, id: ContainerId, constraint: Constraint) {
        self.containers[id.index()].add(constraint);
    }

    /// Copies the evidence currently held by `source` into `target`.
    pub fn merge(&mut self, target: ContainerId, source: ContainerId) {
        if target == source {
            return;
        }
        let evidence = self.containers[source.index()].constraints.clone();
        for constraint in evidence {
            self.add(target, constraint);
        }
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Resolves a container to a type expression.
    ///
    /// No evidence resolves to `Dynamic`; one distinct type resolves to
    /// itself; several resolve to a union in first-seen order. Nullability
    /// evidence marks the result nullable. A container reached again through
    /// its own call or array evidence resolves to `Dynamic` at that point.
    pub fn resolve_to_type(&self, id: ContainerId) -> TypeExpr {
        let mut guard = RecursionGuard::with_profile(RecursionProfile::ConstraintResolution);
        self.resolve_guarded(id, &mut guard)
    }

    fn resolve_guarded(&self, id: ContainerId, guard: &mut RecursionGuard<ContainerId>) -> TypeExpr {
        match guard.enter(id) {
            RecursionResult::Entered => {}
            denied => {
                trace!(?id, ?denied, "constraint resolution cut");
                return TypeExpr::Dynamic;
            }
        }

        let mut nullable = false;
        let mut types: Vec<TypeExpr> = Vec::new();
        for constraint in self.get(id).constraints() {
            let ty = match constraint {
                Constraint::Number => TypeExpr::named(well_known::NUMBER),
                Constraint::String => TypeExpr::named(well_known::STRING),
                Constraint::Boolean => TypeExpr::named(well_known::BOOLEAN),
                Constraint::Unit => TypeExpr::named(well_known::UNIT),
                Constraint::PropertyOwner => TypeExpr::named(well_known::ANY),
                Constraint::Nullable => {
                    nullable = true;
                    continue;
                }
                Constraint::Known(ty) => ty.clone(),
                Constraint::Call { arguments, result } => TypeExpr::function(
                    arguments
                        .iter()
                        .map(|&argument| self.resolve_guarded(argument, guard))
                        .collect(),
                    self.resolve_guarded(*result, guard),
                ),
                Constraint::Callable { arity } => {
                    TypeExpr::function(vec![TypeExpr::Dynamic; *arity], TypeExpr::Dynamic)
                }
                Constraint::ArrayOf { element } => TypeExpr::generic(
                    well_known::ARRAY,
                    vec![self.resolve_guarded(*element, guard)],
                ),
            };
            if !types.contains(&ty) {
                types.push(ty);
            }
        }

        guard.leave(id);

        let resolved = match types.len() {
            0 if nullable => TypeExpr::nullable_any(),
            0 => TypeExpr::Dynamic,
            1 => types.remove(0),
            _ => TypeExpr::union(types),
        };
        if nullable {
            resolved.with_nullable(true)
        } else {
            resolved
        }
    }
}

#[cfg(test)]
#[path = "tests/constraint_tests.rs"]
mod tests;
