//! Semantic declaration model.
//!
//! The tree of typed declarations handed over by the upstream deserializer and
//! consumed by both lowering passes. Pure data: every node is an owned value
//! compared structurally, and passes produce new trees instead of mutating.

pub mod decl;
pub mod expr;
mod ingest;
pub mod source;
pub mod types;

pub use decl::{
    BlockDecl, CallSignatureDecl, ClassDecl, ClassLikeRef, ConstructorDecl, Declaration,
    EnumDecl, EnumMember, ExportAssignmentDecl, ExpressionStatement, FunctionDecl, HeritageRef,
    IfStatement, ImportEqualsDecl, IndexSignatureDecl, InterfaceDecl, MemberDecl,
    MethodSignatureDecl, ModifierFlags, OverrideTarget, ParameterDecl, PropertyDecl,
    ReturnStatement, ThrowStatement, TypeAliasDecl, TypeParameterDecl, VariableDecl,
    WhileStatement,
};
pub use expr::{BinaryOperator, Expression, Literal, ObjectProperty, OperatorClass, UnaryOperator};
pub use source::{ModuleDecl, SourceFile, SourceSet};
pub use types::{FunctionType, TypeExpr, TypeParameterRef, TypeValue, UnionType, well_known};
