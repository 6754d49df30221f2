//! Type expressions.
//!
//! Type expressions are immutable values compared structurally. Recursive
//! types are expressed through name references, never by embedding, so no
//! expression contains a cycle.

use kdecl_common::QualifiedName;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Names of the built-in types the lowering passes reason about.
pub mod well_known {
    pub const ANY: &str = "Any";
    pub const NUMBER: &str = "Number";
    pub const STRING: &str = "String";
    pub const BOOLEAN: &str = "Boolean";
    pub const UNIT: &str = "Unit";
    pub const ARRAY: &str = "Array";
    pub const FUNCTION: &str = "Function";
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum TypeExpr {
    /// Nominal reference: `kotlin.collections.List<String>?`
    #[serde(rename = "TypeValue")]
    Value(TypeValue),
    #[serde(rename = "FunctionType")]
    Function(FunctionType),
    #[serde(rename = "UnionType")]
    Union(UnionType),
    /// Reference to an enclosing generic parameter.
    #[serde(rename = "TypeParameterReference")]
    TypeParameter(TypeParameterRef),
    /// Unconstrained; equivalent to every other type.
    Dynamic,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeValue {
    pub name: QualifiedName,
    #[serde(default)]
    pub params: Vec<TypeExpr>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionType {
    pub parameters: Vec<TypeExpr>,
    pub return_type: Box<TypeExpr>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionType {
    pub params: Vec<TypeExpr>,
    #[serde(default)]
    pub nullable: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameterRef {
    pub name: String,
    #[serde(default)]
    pub nullable: bool,
}

impl TypeExpr {
    pub fn named(name: impl Into<QualifiedName>) -> Self {
        Self::generic(name, Vec::new())
    }

    pub fn generic(name: impl Into<QualifiedName>, params: Vec<TypeExpr>) -> Self {
        TypeExpr::Value(TypeValue {
            name: name.into(),
            params,
            nullable: false,
        })
    }

    pub fn function(parameters: Vec<TypeExpr>, return_type: TypeExpr) -> Self {
        TypeExpr::Function(FunctionType {
            parameters,
            return_type: Box::new(return_type),
            nullable: false,
        })
    }

    pub fn union(params: Vec<TypeExpr>) -> Self {
        TypeExpr::Union(UnionType {
            params,
            nullable: false,
        })
    }

    pub fn type_parameter(name: impl Into<String>) -> Self {
        TypeExpr::TypeParameter(TypeParameterRef {
            name: name.into(),
            nullable: false,
        })
    }

    /// `Any?`, the type of a value known only to be possibly null.
    pub fn nullable_any() -> Self {
        Self::named(well_known::ANY).with_nullable(true)
    }

    /// Returns this type with its nullability flag set to `nullable`.
    /// `Dynamic` has no flag and is returned unchanged.
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        match &mut self {
            TypeExpr::Value(value) => value.nullable = nullable,
            TypeExpr::Function(function) => function.nullable = nullable,
            TypeExpr::Union(union) => union.nullable = nullable,
            TypeExpr::TypeParameter(param) => param.nullable = nullable,
            TypeExpr::Dynamic => {}
        }
        self
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            TypeExpr::Value(value) => value.nullable,
            TypeExpr::Function(function) => function.nullable,
            TypeExpr::Union(union) => union.nullable,
            TypeExpr::TypeParameter(param) => param.nullable,
            TypeExpr::Dynamic => false,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, TypeExpr::Dynamic)
    }

    /// True for the universal nominal `Any`, nullable or not.
    pub fn is_any(&self) -> bool {
        self.is_named(well_known::ANY)
    }

    /// True for a nominal reference spelled exactly `name`.
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, TypeExpr::Value(value) if value.name.is_ident(name))
    }

    pub fn as_value(&self) -> Option<&TypeValue> {
        match self {
            TypeExpr::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Replaces type parameter references by the mapped types.
    ///
    /// A nullable reference (`T?`) yields a nullable substitute.
    pub fn substitute(&self, mapping: &FxHashMap<&str, &TypeExpr>) -> TypeExpr {
        match self {
            TypeExpr::TypeParameter(param) => match mapping.get(param.name.as_str()) {
                Some(&replacement) => {
                    let nullable = param.nullable || replacement.is_nullable();
                    replacement.clone().with_nullable(nullable)
                }
                None => self.clone(),
            },
            TypeExpr::Value(value) => TypeExpr::Value(TypeValue {
                name: value.name.clone(),
                params: value.params.iter().map(|p| p.substitute(mapping)).collect(),
                nullable: value.nullable,
            }),
            TypeExpr::Function(function) => TypeExpr::Function(FunctionType {
                parameters: function
                    .parameters
                    .iter()
                    .map(|p| p.substitute(mapping))
                    .collect(),
                return_type: Box::new(function.return_type.substitute(mapping)),
                nullable: function.nullable,
            }),
            TypeExpr::Union(union) => TypeExpr::Union(UnionType {
                params: union.params.iter().map(|p| p.substitute(mapping)).collect(),
                nullable: union.nullable,
            }),
            TypeExpr::Dynamic => TypeExpr::Dynamic,
        }
    }
}

impl TypeValue {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.is_ident(name)
    }
}

#[cfg(test)]
#[path = "tests/types_tests.rs"]
mod tests;
