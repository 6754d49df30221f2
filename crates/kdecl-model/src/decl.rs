//! Declarations, class members, and the statements of function bodies.
//!
//! `Declaration` is the closed set of nodes that may appear in a module's
//! declaration list or a block's statement list. `MemberDecl` is the closed
//! set of nodes owned by a class-like declaration.

use crate::expr::Expression;
use crate::source::ModuleDecl;
use crate::types::TypeExpr;
use bitflags::bitflags;
use kdecl_common::QualifiedName;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ModifierFlags: u16 {
        const EXPORT = 1 << 0;
        const DECLARE = 1 << 1;
        const DEFAULT = 1 << 2;
        const STATIC = 1 << 3;
        const ABSTRACT = 1 << 4;
        const READONLY = 1 << 5;
        const OPEN = 1 << 6;
    }
}

/// Where an overriding member's overridden declaration lives.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum OverrideTarget {
    /// Overrides a member of the named ancestor.
    Ancestor { fq_name: QualifiedName },
    /// `equals`/`hashCode`/`toString`, overriding the universal base type.
    SpecialCase,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParameterDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub vararg: bool,
    #[serde(default)]
    pub optional: bool,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            initializer: None,
            vararg: false,
            optional: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameterDecl {
    pub name: String,
    #[serde(default)]
    pub constraints: Vec<TypeExpr>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(rename = "type")]
    pub return_type: TypeExpr,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default = "ModifierFlags::empty")]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub body: Option<BlockDecl>,
    #[serde(default, rename = "override")]
    pub override_of: Option<OverrideTarget>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDecl>, return_type: TypeExpr) -> Self {
        Self {
            name: name.into(),
            parameters,
            return_type,
            type_parameters: Vec::new(),
            modifiers: ModifierFlags::empty(),
            body: None,
            override_of: None,
        }
    }

    pub fn with_body(mut self, statements: Vec<Declaration>) -> Self {
        self.body = Some(BlockDecl { statements });
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignatureDecl {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(rename = "type")]
    pub return_type: TypeExpr,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default = "ModifierFlags::empty")]
    pub modifiers: ModifierFlags,
    #[serde(default, rename = "override")]
    pub override_of: Option<OverrideTarget>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstructorDecl {
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default = "ModifierFlags::empty")]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub body: Option<BlockDecl>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default = "ModifierFlags::empty")]
    pub modifiers: ModifierFlags,
    #[serde(default, rename = "override")]
    pub override_of: Option<OverrideTarget>,
}

impl PropertyDecl {
    pub fn new(name: impl Into<String>, ty: TypeExpr) -> Self {
        Self {
            name: name.into(),
            ty,
            type_parameters: Vec::new(),
            optional: false,
            modifiers: ModifierFlags::empty(),
            override_of: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSignatureDecl {
    pub index_types: Vec<ParameterDecl>,
    #[serde(rename = "type")]
    pub return_type: TypeExpr,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallSignatureDecl {
    #[serde(default)]
    pub parameters: Vec<ParameterDecl>,
    #[serde(rename = "type")]
    pub return_type: TypeExpr,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
}

/// A declared parent of a class-like declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeritageRef {
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    /// `extends` when true, `implements` otherwise.
    #[serde(default)]
    pub extending: bool,
}

impl HeritageRef {
    pub fn extends(ty: TypeExpr) -> Self {
        Self { ty, extending: true }
    }

    pub fn implements(ty: TypeExpr) -> Self {
        Self { ty, extending: false }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDecl {
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default, rename = "parentEntities")]
    pub heritage: Vec<HeritageRef>,
    #[serde(default = "ModifierFlags::empty")]
    pub modifiers: ModifierFlags,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(default, rename = "parentEntities")]
    pub heritage: Vec<HeritageRef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum MemberDecl {
    #[serde(rename = "FunctionDeclaration")]
    Method(FunctionDecl),
    #[serde(rename = "MethodSignatureDeclaration")]
    MethodSignature(MethodSignatureDecl),
    #[serde(rename = "ConstructorDeclaration")]
    Constructor(ConstructorDecl),
    #[serde(rename = "PropertyDeclaration")]
    Property(PropertyDecl),
    #[serde(rename = "IndexSignatureDeclaration")]
    IndexSignature(IndexSignatureDecl),
    #[serde(rename = "CallSignatureDeclaration")]
    CallSignature(CallSignatureDecl),
    #[serde(rename = "ClassDeclaration")]
    Class(ClassDecl),
    #[serde(rename = "InterfaceDeclaration")]
    Interface(InterfaceDecl),
}

impl MemberDecl {
    pub fn as_class_like(&self) -> Option<ClassLikeRef<'_>> {
        match self {
            MemberDecl::Class(class) => Some(ClassLikeRef::Class(class)),
            MemberDecl::Interface(interface) => Some(ClassLikeRef::Interface(interface)),
            _ => None,
        }
    }
}

/// Borrowed view over either kind of class-like declaration.
#[derive(Clone, Copy, Debug)]
pub enum ClassLikeRef<'a> {
    Class(&'a ClassDecl),
    Interface(&'a InterfaceDecl),
}

impl<'a> ClassLikeRef<'a> {
    pub fn name(self) -> &'a str {
        match self {
            ClassLikeRef::Class(class) => &class.name,
            ClassLikeRef::Interface(interface) => &interface.name,
        }
    }

    pub fn members(self) -> &'a [MemberDecl] {
        match self {
            ClassLikeRef::Class(class) => &class.members,
            ClassLikeRef::Interface(interface) => &interface.members,
        }
    }

    pub fn heritage(self) -> &'a [HeritageRef] {
        match self {
            ClassLikeRef::Class(class) => &class.heritage,
            ClassLikeRef::Interface(interface) => &interface.heritage,
        }
    }

    pub fn type_parameters(self) -> &'a [TypeParameterDecl] {
        match self {
            ClassLikeRef::Class(class) => &class.type_parameters,
            ClassLikeRef::Interface(interface) => &interface.type_parameters,
        }
    }

    /// Nested class-like members, in declaration order.
    pub fn nested_class_likes(self) -> impl Iterator<Item = ClassLikeRef<'a>> {
        self.members().iter().filter_map(MemberDecl::as_class_like)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeExpr,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default = "ModifierFlags::empty")]
    pub modifiers: ModifierFlags,
}

impl VariableDecl {
    pub fn new(name: impl Into<String>, initializer: Expression) -> Self {
        Self {
            name: name.into(),
            ty: TypeExpr::Dynamic,
            initializer: Some(initializer),
            modifiers: ModifierFlags::empty(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumMember {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    #[serde(default)]
    pub members: Vec<EnumMember>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAliasDecl {
    #[serde(rename = "aliasName")]
    pub name: String,
    #[serde(default)]
    pub type_parameters: Vec<TypeParameterDecl>,
    #[serde(rename = "typeReference")]
    pub target: TypeExpr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportAssignmentDecl {
    pub name: String,
    #[serde(default)]
    pub is_export_equals: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportEqualsDecl {
    pub name: String,
    pub module_reference: QualifiedName,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockDecl {
    #[serde(default)]
    pub statements: Vec<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    #[serde(default)]
    pub expression: Option<Expression>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IfStatement {
    pub condition: Expression,
    pub then_statement: Box<Declaration>,
    #[serde(default)]
    pub else_statement: Option<Box<Declaration>>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub statement: Box<Declaration>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ThrowStatement {
    pub expression: Expression,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reflection")]
pub enum Declaration {
    #[serde(rename = "FunctionDeclaration")]
    Function(FunctionDecl),
    #[serde(rename = "ClassDeclaration")]
    Class(ClassDecl),
    #[serde(rename = "InterfaceDeclaration")]
    Interface(InterfaceDecl),
    #[serde(rename = "VariableDeclaration")]
    Variable(VariableDecl),
    #[serde(rename = "EnumDeclaration")]
    Enum(EnumDecl),
    #[serde(rename = "TypeAliasDeclaration")]
    TypeAlias(TypeAliasDecl),
    #[serde(rename = "ModuleDeclaration")]
    Module(ModuleDecl),
    #[serde(rename = "ExportAssignmentDeclaration")]
    ExportAssignment(ExportAssignmentDecl),
    #[serde(rename = "ImportEqualsDeclaration")]
    ImportEquals(ImportEqualsDecl),
    #[serde(rename = "BlockDeclaration")]
    Block(BlockDecl),
    #[serde(rename = "ExpressionStatementDeclaration")]
    ExpressionStatement(ExpressionStatement),
    #[serde(rename = "ReturnStatementDeclaration")]
    Return(ReturnStatement),
    #[serde(rename = "IfStatementDeclaration")]
    If(IfStatement),
    #[serde(rename = "WhileStatementDeclaration")]
    While(WhileStatement),
    #[serde(rename = "ThrowStatementDeclaration")]
    Throw(ThrowStatement),
}

impl Declaration {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Function(_) => "FunctionDeclaration",
            Declaration::Class(_) => "ClassDeclaration",
            Declaration::Interface(_) => "InterfaceDeclaration",
            Declaration::Variable(_) => "VariableDeclaration",
            Declaration::Enum(_) => "EnumDeclaration",
            Declaration::TypeAlias(_) => "TypeAliasDeclaration",
            Declaration::Module(_) => "ModuleDeclaration",
            Declaration::ExportAssignment(_) => "ExportAssignmentDeclaration",
            Declaration::ImportEquals(_) => "ImportEqualsDeclaration",
            Declaration::Block(_) => "BlockDeclaration",
            Declaration::ExpressionStatement(_) => "ExpressionStatement",
            Declaration::Return(_) => "ReturnStatement",
            Declaration::If(_) => "IfStatement",
            Declaration::While(_) => "WhileStatement",
            Declaration::Throw(_) => "ThrowStatement",
        }
    }

    pub fn as_class_like(&self) -> Option<ClassLikeRef<'_>> {
        match self {
            Declaration::Class(class) => Some(ClassLikeRef::Class(class)),
            Declaration::Interface(interface) => Some(ClassLikeRef::Interface(interface)),
            _ => None,
        }
    }

    pub fn expression(expression: Expression) -> Self {
        Declaration::ExpressionStatement(ExpressionStatement { expression })
    }

    pub fn returning(expression: Expression) -> Self {
        Declaration::Return(ReturnStatement {
            expression: Some(expression),
        })
    }

    pub fn variable(name: impl Into<String>, initializer: Expression) -> Self {
        Declaration::Variable(VariableDecl::new(name, initializer))
    }
}
