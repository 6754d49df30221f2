//! Heritage walks and the member tables of ancestors.

use crate::context::{ModelContext, ResolvedClassLike};
use indexmap::IndexMap;
use kdecl_common::{QualifiedName, RecursionGuard, RecursionProfile, RecursionResult};
use kdecl_model::{
    ClassLikeRef, FunctionDecl, MemberDecl, MethodSignatureDecl, ParameterDecl, PropertyDecl,
    TypeExpr,
};
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use tracing::{debug, trace};

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// The signature-relevant parts of a method or method signature.
#[derive(Clone, Copy, Debug)]
pub struct MethodView<'a> {
    pub name: &'a str,
    pub parameters: &'a [ParameterDecl],
    pub return_type: &'a TypeExpr,
    pub type_parameter_count: usize,
}

impl<'a> MethodView<'a> {
    pub fn of(member: &'a MemberDecl) -> Option<Self> {
        match member {
            MemberDecl::Method(method) => Some(Self::of_function(method)),
            MemberDecl::MethodSignature(signature) => Some(Self::of_signature(signature)),
            _ => None,
        }
    }

    pub fn of_function(method: &'a FunctionDecl) -> Self {
        Self {
            name: &method.name,
            parameters: &method.parameters,
            return_type: &method.return_type,
            type_parameter_count: method.type_parameters.len(),
        }
    }

    pub fn of_signature(signature: &'a MethodSignatureDecl) -> Self {
        Self {
            name: &signature.name,
            parameters: &signature.parameters,
            return_type: &signature.return_type,
            type_parameter_count: signature.type_parameters.len(),
        }
    }
}

/// Every known ancestor of `class_like`, depth-first in declared heritage
/// order: the first parent's whole lineage precedes the second parent.
///
/// `fq_name` names `class_like` itself, which is never listed even when a
/// heritage cycle leads back to it. Unresolvable heritage references
/// contribute nothing. Each ancestor is listed once, at its first encounter,
/// which also ends cyclic walks.
pub fn known_parents<'c, 'a>(
    context: &'c ModelContext<'a>,
    class_like: ClassLikeRef<'a>,
    fq_name: &QualifiedName,
) -> Vec<&'c ResolvedClassLike<'a>> {
    let mut found: FxIndexMap<&'c QualifiedName, &'c ResolvedClassLike<'a>> =
        FxIndexMap::default();
    let mut guard = RecursionGuard::with_profile(RecursionProfile::HeritageWalk);
    collect_parents(context, class_like, fq_name, &mut found, &mut guard);
    found.into_values().collect()
}

fn collect_parents<'c, 'a>(
    context: &'c ModelContext<'a>,
    class_like: ClassLikeRef<'a>,
    root: &QualifiedName,
    found: &mut FxIndexMap<&'c QualifiedName, &'c ResolvedClassLike<'a>>,
    guard: &mut RecursionGuard<&'c QualifiedName>,
) {
    for heritage in class_like.heritage() {
        let Some(parent) = context.resolve_type(&heritage.ty) else {
            trace!(ty = ?heritage.ty, "heritage reference is not a known class-like");
            continue;
        };
        let key = parent.fq_name();
        if key == root {
            debug!(fq_name = %root, "heritage cycle back to the walked class");
            continue;
        }
        if found.contains_key(key) {
            continue;
        }
        found.insert(key, parent);

        match guard.enter(key) {
            RecursionResult::Entered => {
                collect_parents(context, parent.class_like, root, found, guard);
                guard.leave(key);
            }
            denied => {
                debug!(fq_name = %key, ?denied, "heritage walk cut");
            }
        }
    }
}

/// Methods and properties of one ancestor, grouped by name.
#[derive(Debug)]
pub struct ParentMembers<'a> {
    pub fq_name: QualifiedName,
    pub methods: FxIndexMap<&'a str, SmallVec<[MethodView<'a>; 1]>>,
    pub properties: FxIndexMap<&'a str, SmallVec<[&'a PropertyDecl; 1]>>,
}

impl<'a> ParentMembers<'a> {
    pub fn of(parent: &ResolvedClassLike<'a>) -> Self {
        let mut methods: FxIndexMap<&'a str, SmallVec<[MethodView<'a>; 1]>> =
            FxIndexMap::default();
        let mut properties: FxIndexMap<&'a str, SmallVec<[&'a PropertyDecl; 1]>> =
            FxIndexMap::default();
        for member in parent.class_like.members() {
            if let Some(method) = MethodView::of(member) {
                methods.entry(method.name).or_default().push(method);
            } else if let MemberDecl::Property(property) = member {
                properties
                    .entry(property.name.as_str())
                    .or_default()
                    .push(property);
            }
        }
        Self {
            fq_name: parent.fq_name().clone(),
            methods,
            properties,
        }
    }

    pub fn methods_named(&self, name: &str) -> &[MethodView<'a>] {
        self.methods
            .get(name)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }

    pub fn properties_named(&self, name: &str) -> &[&'a PropertyDecl] {
        self.properties
            .get(name)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
    }
}

/// [`ParentMembers`] for every known ancestor, in [`known_parents`] order.
pub fn all_parent_members<'a>(
    context: &ModelContext<'a>,
    class_like: ClassLikeRef<'a>,
    fq_name: &QualifiedName,
) -> Vec<ParentMembers<'a>> {
    known_parents(context, class_like, fq_name)
        .into_iter()
        .map(ParentMembers::of)
        .collect()
}

#[cfg(test)]
#[path = "tests/hierarchy_tests.rs"]
mod tests;
