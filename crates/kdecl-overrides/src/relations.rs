//! Type equivalence and the overriding relation.
//!
//! Both relations unalias their operands first. Equivalence is the relation
//! parameters must satisfy; overriding is the (asymmetric) relation return
//! and property types must satisfy.

use crate::context::ModelContext;
use crate::hierarchy::{MethodView, known_parents};
use kdecl_common::limits::MAX_TYPE_RELATION_DEPTH;
use kdecl_model::{ParameterDecl, PropertyDecl, TypeExpr, TypeValue, well_known};
use tracing::trace;

pub struct TypeRelations<'c, 'a> {
    context: &'c ModelContext<'a>,
}

impl<'c, 'a> TypeRelations<'c, 'a> {
    pub fn new(context: &'c ModelContext<'a>) -> Self {
        Self { context }
    }

    /// Structural equivalence, with `Dynamic` equivalent to everything and a
    /// function type equivalent to the nominal `Function`.
    pub fn is_equivalent(&self, a: &TypeExpr, b: &TypeExpr) -> bool {
        self.equivalent(a, b, 0)
    }

    /// Whether a member of type `a` may override one of type `b`.
    pub fn is_overriding(&self, a: &TypeExpr, b: &TypeExpr) -> bool {
        self.overriding(a, b, None, 0)
    }

    /// Same name, same number of type parameters, pairwise equivalent
    /// parameters, and an overriding return type.
    pub fn method_overrides(&self, method: &MethodView<'_>, ancestor: &MethodView<'_>) -> bool {
        method.name == ancestor.name
            && method.type_parameter_count == ancestor.type_parameter_count
            && self.parameters_equivalent(method.parameters, ancestor.parameters)
            && self.is_overriding(method.return_type, ancestor.return_type)
    }

    pub fn property_overrides(&self, property: &PropertyDecl, ancestor: &PropertyDecl) -> bool {
        property.name == ancestor.name && self.is_overriding(&property.ty, &ancestor.ty)
    }

    pub fn parameters_equivalent(&self, a: &[ParameterDecl], b: &[ParameterDecl]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(a, b)| self.equivalent(&a.ty, &b.ty, 0))
    }

    fn all_equivalent(&self, a: &[TypeExpr], b: &[TypeExpr], depth: u32) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(a, b)| self.equivalent(a, b, depth))
    }

    fn equivalent(&self, a: &TypeExpr, b: &TypeExpr, depth: u32) -> bool {
        if a == b {
            return true;
        }
        if depth > MAX_TYPE_RELATION_DEPTH {
            trace!(?a, ?b, "type relation depth exceeded");
            return false;
        }
        let a = self.context.unalias(a);
        let b = self.context.unalias(b);
        match (&a, &b) {
            (TypeExpr::Dynamic, _) | (_, TypeExpr::Dynamic) => true,
            (TypeExpr::Value(a), TypeExpr::Value(b)) => {
                a.name == b.name
                    && a.nullable == b.nullable
                    && self.all_equivalent(&a.params, &b.params, depth + 1)
            }
            (TypeExpr::Function(a), TypeExpr::Function(b)) => {
                self.all_equivalent(&a.parameters, &b.parameters, depth + 1)
                    && self.overriding(&a.return_type, &b.return_type, None, depth + 1)
            }
            (TypeExpr::Function(_), TypeExpr::Value(value))
            | (TypeExpr::Value(value), TypeExpr::Function(_)) => {
                value.is_named(well_known::FUNCTION)
            }
            _ => a == b,
        }
    }

    /// `container` is the generic type whose argument position is being
    /// compared. Arguments are invariant except inside `Array`: an invariant
    /// position accepts equivalent types, and a type parameter where `Any`
    /// is expected.
    fn overriding(
        &self,
        a: &TypeExpr,
        b: &TypeExpr,
        container: Option<&TypeValue>,
        depth: u32,
    ) -> bool {
        if depth > MAX_TYPE_RELATION_DEPTH {
            trace!(?a, ?b, "type relation depth exceeded");
            return false;
        }
        let covariant = container.is_none_or(|value| value.is_named(well_known::ARRAY));
        if !covariant {
            return self.equivalent(a, b, depth)
                || (matches!(a, TypeExpr::TypeParameter(_)) && self.context.unalias(b).is_any());
        }
        if self.equivalent(a, b, depth) {
            return true;
        }

        let a = self.context.unalias(a);
        let b = self.context.unalias(b);
        if b.is_any() {
            return true;
        }

        let (TypeExpr::Value(a_value), TypeExpr::Value(b_value)) = (&a, &b) else {
            return false;
        };
        let (Some(a_class), Some(b_class)) = (
            self.context.resolve(&a_value.name),
            self.context.resolve(&b_value.name),
        ) else {
            return false;
        };

        let same_class = a_class.is_same(b_class);
        if a_value.params.is_empty() && b_value.params.is_empty() {
            return same_class
                || known_parents(self.context, a_class.class_like, a_class.fq_name())
                    .iter()
                    .any(|parent| parent.is_same(b_class));
        }
        if same_class && a_value.params.len() == b_value.params.len() {
            return a_value
                .params
                .iter()
                .zip(&b_value.params)
                .all(|(a, b)| self.overriding(a, b, Some(a_value), depth + 1));
        }
        false
    }
}

/// `equals(Any?)`, `hashCode(): Number` and `toString()` override the
/// universal base type even without a matching ancestor.
pub fn is_special_case(method: &MethodView<'_>) -> bool {
    match method.name {
        "equals" => matches!(
            method.parameters,
            [parameter] if parameter.ty.is_any() && parameter.ty.is_nullable()
        ),
        "hashCode" => {
            method.parameters.is_empty() && method.return_type.is_named(well_known::NUMBER)
        }
        "toString" => method.parameters.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/relations_tests.rs"]
mod tests;
