//! `introduceTypes`: fills in parameter and return types of functions with
//! bodies by propagating constraints through their statements.
//!
//! Every entry point returns a new tree; the input is never modified.
//! Declarations without a body pass through unchanged.

use crate::constraint::{ConstraintArena, ContainerId, ReturnConstraintContainer};
use crate::propagate::ConstraintPropagator;
use crate::scope::Scope;
use kdecl_common::LoweringError;
use kdecl_model::{
    BlockDecl, ClassDecl, ConstructorDecl, Declaration, FunctionDecl, InterfaceDecl, MemberDecl,
    ModuleDecl, ParameterDecl, SourceFile, SourceSet, TypeExpr,
};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Inferred signature of one body.
struct InferredSignature {
    parameters: Vec<TypeExpr>,
    return_type: TypeExpr,
}

/// Runs inference over a whole source set. Only sources whose file name ends
/// with one of `declaration_suffixes` are transformed.
pub fn introduce_types_in_source_set<S: AsRef<str>>(
    sources: &SourceSet,
    declaration_suffixes: &[S],
) -> Result<SourceSet, LoweringError> {
    let sources = sources
        .sources
        .iter()
        .map(|source| introduce_types_in_source(source, declaration_suffixes))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SourceSet { sources })
}

pub fn introduce_types_in_source<S: AsRef<str>>(
    source: &SourceFile,
    declaration_suffixes: &[S],
) -> Result<SourceFile, LoweringError> {
    if !source.is_declaration_source(declaration_suffixes) {
        trace!(file = %source.file_name, "not a declaration source, skipping inference");
        return Ok(source.clone());
    }
    debug!(file = %source.file_name, "introducing types");
    Ok(SourceFile {
        file_name: source.file_name.clone(),
        root: introduce_types_in_module(&source.root)?,
    })
}

pub fn introduce_types_in_module(module: &ModuleDecl) -> Result<ModuleDecl, LoweringError> {
    Ok(ModuleDecl {
        name: module.name.clone(),
        declarations: introduce_types_in_declarations(&module.declarations)?,
        submodules: module
            .submodules
            .iter()
            .map(introduce_types_in_module)
            .collect::<Result<_, _>>()?,
    })
}

fn introduce_types_in_declarations(
    declarations: &[Declaration],
) -> Result<Vec<Declaration>, LoweringError> {
    declarations
        .iter()
        .map(introduce_types_in_declaration)
        .collect()
}

/// Applies inference to one module-level (or block-level) declaration.
///
/// Control-flow statements are not expected outside function bodies and
/// fail with [`LoweringError::UnexpectedTopLevel`].
pub fn introduce_types_in_declaration(
    declaration: &Declaration,
) -> Result<Declaration, LoweringError> {
    Ok(match declaration {
        Declaration::Function(function) => Declaration::Function(infer_function(function)?),
        Declaration::Class(class) => Declaration::Class(introduce_types_in_class(class)?),
        Declaration::Interface(interface) => {
            Declaration::Interface(introduce_types_in_interface(interface)?)
        }
        Declaration::Block(block) => Declaration::Block(BlockDecl {
            statements: introduce_types_in_declarations(&block.statements)?,
        }),
        Declaration::Module(module) => Declaration::Module(introduce_types_in_module(module)?),
        Declaration::Variable(_)
        | Declaration::Enum(_)
        | Declaration::TypeAlias(_)
        | Declaration::ExportAssignment(_)
        | Declaration::ImportEquals(_)
        | Declaration::ExpressionStatement(_)
        | Declaration::Return(_) => declaration.clone(),
        Declaration::If(_) | Declaration::While(_) | Declaration::Throw(_) => {
            return Err(LoweringError::UnexpectedTopLevel {
                kind: declaration.kind_name(),
            });
        }
    })
}

fn introduce_types_in_class(class: &ClassDecl) -> Result<ClassDecl, LoweringError> {
    Ok(ClassDecl {
        members: introduce_types_in_members(&class.members)?,
        ..class.clone()
    })
}

fn introduce_types_in_interface(interface: &InterfaceDecl) -> Result<InterfaceDecl, LoweringError> {
    Ok(InterfaceDecl {
        members: introduce_types_in_members(&interface.members)?,
        ..interface.clone()
    })
}

fn introduce_types_in_members(members: &[MemberDecl]) -> Result<Vec<MemberDecl>, LoweringError> {
    members.iter().map(introduce_types_in_member).collect()
}

pub fn introduce_types_in_member(member: &MemberDecl) -> Result<MemberDecl, LoweringError> {
    Ok(match member {
        MemberDecl::Method(method) => MemberDecl::Method(infer_function(method)?),
        MemberDecl::Constructor(constructor) => {
            MemberDecl::Constructor(infer_constructor(constructor)?)
        }
        MemberDecl::Class(class) => MemberDecl::Class(introduce_types_in_class(class)?),
        MemberDecl::Interface(interface) => {
            MemberDecl::Interface(introduce_types_in_interface(interface)?)
        }
        MemberDecl::MethodSignature(_)
        | MemberDecl::Property(_)
        | MemberDecl::IndexSignature(_)
        | MemberDecl::CallSignature(_) => member.clone(),
    })
}

/// Replaces a function's parameter and return types with the types its body
/// implies. A function without a body is returned unchanged.
#[tracing::instrument(level = "trace", skip_all, fields(function = %function.name))]
pub fn infer_function(function: &FunctionDecl) -> Result<FunctionDecl, LoweringError> {
    let Some(body) = &function.body else {
        return Ok(function.clone());
    };
    let signature = infer_signature(&function.name, &function.parameters, body)?;
    debug!(return_type = ?signature.return_type, "inferred signature");
    Ok(FunctionDecl {
        parameters: retype_parameters(&function.parameters, signature.parameters),
        return_type: signature.return_type,
        ..function.clone()
    })
}

/// Constructor counterpart of [`infer_function`]; only parameters change.
#[tracing::instrument(level = "trace", skip_all)]
pub fn infer_constructor(constructor: &ConstructorDecl) -> Result<ConstructorDecl, LoweringError> {
    let Some(body) = &constructor.body else {
        return Ok(constructor.clone());
    };
    let signature = infer_signature("constructor", &constructor.parameters, body)?;
    Ok(ConstructorDecl {
        parameters: retype_parameters(&constructor.parameters, signature.parameters),
        ..constructor.clone()
    })
}

fn retype_parameters(parameters: &[ParameterDecl], types: Vec<TypeExpr>) -> Vec<ParameterDecl> {
    parameters
        .iter()
        .zip(types)
        .map(|(parameter, ty)| ParameterDecl {
            ty,
            ..parameter.clone()
        })
        .collect()
}

fn infer_signature(
    function: &str,
    parameters: &[ParameterDecl],
    body: &BlockDecl,
) -> Result<InferredSignature, LoweringError> {
    let mut arena = ConstraintArena::new();
    let mut scope = Scope::new();

    // Positional, so a later rebinding of a parameter name cannot leak into
    // the parameter's own type.
    let parameter_containers: SmallVec<[ContainerId; 4]> = parameters
        .iter()
        .map(|parameter| {
            let container = arena.alloc();
            scope.set(parameter.name.as_str(), container);
            container
        })
        .collect();

    let mut returns = ReturnConstraintContainer::new();
    let mut propagator = ConstraintPropagator::new(function, &mut arena, &mut scope);
    for statement in &body.statements {
        match statement {
            Declaration::Variable(variable) => {
                propagator.bind_variable(variable)?;
            }
            Declaration::ExpressionStatement(statement) => {
                propagator.evaluate(&statement.expression)?;
            }
            Declaration::Return(statement) => {
                let evidence = match &statement.expression {
                    Some(expression) => propagator.evaluate(expression)?,
                    None => propagator.unit(),
                };
                returns = ReturnConstraintContainer::with_evidence(evidence);
            }
            other => {
                return Err(LoweringError::UnsupportedStatement {
                    function: function.to_string(),
                    kind: other.kind_name(),
                });
            }
        }
    }

    trace!(containers = arena.len(), bindings = scope.len(), "resolving");
    Ok(InferredSignature {
        parameters: parameter_containers
            .iter()
            .map(|&container| arena.resolve_to_type(container))
            .collect(),
        return_type: returns.resolve_to_type(&arena),
    })
}
