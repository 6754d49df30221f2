//! Reading the declaration model produced by the upstream deserializer.
//!
//! Every node carries a `"reflection"` tag naming its variant. After
//! deserialization, parameter initializers are checked: a declaration may only
//! say that a default exists (`definedExternally`), never what it is.

use crate::decl::{ClassLikeRef, Declaration, MemberDecl, ParameterDecl};
use crate::expr::Expression;
use crate::source::{ModuleDecl, SourceSet};
use kdecl_common::LoweringError;
use tracing::debug;

impl SourceSet {
    pub fn from_json_str(text: &str) -> Result<SourceSet, LoweringError> {
        let source_set: SourceSet = serde_json::from_str(text)?;
        source_set.validate_initializers()?;
        debug!(sources = source_set.sources.len(), "ingested source set");
        Ok(source_set)
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<SourceSet, LoweringError> {
        let source_set: SourceSet = serde_json::from_value(value)?;
        source_set.validate_initializers()?;
        Ok(source_set)
    }

    /// Rejects any parameter initializer other than `definedExternally`.
    ///
    /// Closure parameters inside expressions are not checked; closures are
    /// never analyzed.
    pub fn validate_initializers(&self) -> Result<(), LoweringError> {
        self.sources
            .iter()
            .try_for_each(|source| validate_module(&source.root))
    }
}

fn validate_module(module: &ModuleDecl) -> Result<(), LoweringError> {
    module.declarations.iter().try_for_each(validate_declaration)?;
    module.submodules.iter().try_for_each(validate_module)
}

fn validate_declaration(declaration: &Declaration) -> Result<(), LoweringError> {
    match declaration {
        Declaration::Function(function) => {
            validate_parameters(&function.parameters)?;
            if let Some(body) = &function.body {
                body.statements.iter().try_for_each(validate_declaration)?;
            }
            Ok(())
        }
        Declaration::Class(_) | Declaration::Interface(_) => match declaration.as_class_like() {
            Some(class_like) => validate_class_like(class_like),
            None => Ok(()),
        },
        Declaration::Module(module) => validate_module(module),
        Declaration::Block(block) => block.statements.iter().try_for_each(validate_declaration),
        Declaration::If(statement) => {
            validate_declaration(&statement.then_statement)?;
            match &statement.else_statement {
                Some(else_statement) => validate_declaration(else_statement),
                None => Ok(()),
            }
        }
        Declaration::While(statement) => validate_declaration(&statement.statement),
        Declaration::Variable(_)
        | Declaration::Enum(_)
        | Declaration::TypeAlias(_)
        | Declaration::ExportAssignment(_)
        | Declaration::ImportEquals(_)
        | Declaration::ExpressionStatement(_)
        | Declaration::Return(_)
        | Declaration::Throw(_) => Ok(()),
    }
}

fn validate_class_like(class_like: ClassLikeRef<'_>) -> Result<(), LoweringError> {
    for member in class_like.members() {
        match member {
            MemberDecl::Method(method) => {
                validate_parameters(&method.parameters)?;
                if let Some(body) = &method.body {
                    body.statements.iter().try_for_each(validate_declaration)?;
                }
            }
            MemberDecl::MethodSignature(signature) => validate_parameters(&signature.parameters)?,
            MemberDecl::Constructor(constructor) => {
                validate_parameters(&constructor.parameters)?;
                if let Some(body) = &constructor.body {
                    body.statements.iter().try_for_each(validate_declaration)?;
                }
            }
            MemberDecl::CallSignature(signature) => validate_parameters(&signature.parameters)?,
            MemberDecl::IndexSignature(signature) => validate_parameters(&signature.index_types)?,
            MemberDecl::Class(_) | MemberDecl::Interface(_) => {
                if let Some(nested) = member.as_class_like() {
                    validate_class_like(nested)?;
                }
            }
            MemberDecl::Property(_) => {}
        }
    }
    Ok(())
}

fn validate_parameters(parameters: &[ParameterDecl]) -> Result<(), LoweringError> {
    for parameter in parameters {
        match &parameter.initializer {
            None | Some(Expression::DefinedExternally) => {}
            Some(other) => {
                return Err(LoweringError::MalformedInitializer {
                    parameter: parameter.name.clone(),
                    found: other.kind_name().to_string(),
                });
            }
        }
    }
    Ok(())
}
