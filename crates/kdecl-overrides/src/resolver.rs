//! `lowerOverrides`: attaches override markers to methods and properties.

use crate::context::ModelContext;
use crate::hierarchy::{MethodView, ParentMembers, all_parent_members};
use crate::relations::{TypeRelations, is_special_case};
use kdecl_common::{LoweringError, QualifiedName};
use kdecl_model::{
    ClassDecl, ClassLikeRef, Declaration, InterfaceDecl, MemberDecl, ModuleDecl, OverrideTarget,
    ParameterDecl, PropertyDecl, SourceSet,
};
use tracing::{debug, trace};

/// Builds the model context for `sources` (and `stdlib`, registered first)
/// and lowers every module of `sources`.
pub fn lower_overrides(
    sources: &SourceSet,
    stdlib: Option<&SourceSet>,
) -> Result<SourceSet, LoweringError> {
    let context = ModelContext::build(sources, stdlib)?;
    let resolver = OverrideResolver::new(&context);
    Ok(sources.transform(|module| resolver.lower_module(module)))
}

/// Decides override markers against a fully built [`ModelContext`].
pub struct OverrideResolver<'c, 'a> {
    context: &'c ModelContext<'a>,
    relations: TypeRelations<'c, 'a>,
}

impl<'c, 'a> OverrideResolver<'c, 'a> {
    pub fn new(context: &'c ModelContext<'a>) -> Self {
        Self {
            context,
            relations: TypeRelations::new(context),
        }
    }

    pub fn lower_module(&self, module: &ModuleDecl) -> ModuleDecl {
        ModuleDecl {
            name: module.name.clone(),
            declarations: module
                .declarations
                .iter()
                .map(|declaration| self.lower_declaration(declaration, &module.name))
                .collect(),
            submodules: module
                .submodules
                .iter()
                .map(|submodule| self.lower_module(submodule))
                .collect(),
        }
    }

    fn lower_declaration(
        &self,
        declaration: &Declaration,
        owner: &QualifiedName,
    ) -> Declaration {
        match declaration {
            Declaration::Class(class) => Declaration::Class(self.lower_class(class, owner)),
            Declaration::Interface(interface) => {
                Declaration::Interface(self.lower_interface(interface, owner))
            }
            Declaration::Module(module) => Declaration::Module(self.lower_module(module)),
            other => other.clone(),
        }
    }

    /// Lowers `class`, declared in the module or class-like named `owner`.
    pub fn lower_class(&self, class: &ClassDecl, owner: &QualifiedName) -> ClassDecl {
        ClassDecl {
            members: self
                .lower_members(ClassLikeRef::Class(class), &owner.append(&class.name)),
            ..class.clone()
        }
    }

    pub fn lower_interface(
        &self,
        interface: &InterfaceDecl,
        owner: &QualifiedName,
    ) -> InterfaceDecl {
        let fq_name = owner.append(&interface.name);
        InterfaceDecl {
            members: self.lower_members(ClassLikeRef::Interface(interface), &fq_name),
            ..interface.clone()
        }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(class_like = %fq_name))]
    fn lower_members(
        &self,
        class_like: ClassLikeRef<'_>,
        fq_name: &QualifiedName,
    ) -> Vec<MemberDecl> {
        let parents = all_parent_members(self.context, class_like, fq_name);
        trace!(ancestors = parents.len(), "collected ancestor members");
        class_like
            .members()
            .iter()
            .map(|member| self.lower_member(member, &parents, fq_name))
            .collect()
    }

    fn lower_member(
        &self,
        member: &MemberDecl,
        parents: &[ParentMembers<'_>],
        owner: &QualifiedName,
    ) -> MemberDecl {
        match member {
            MemberDecl::Method(method) => {
                match self.method_target(&MethodView::of_function(method), parents) {
                    Some(target) => {
                        let mut method = method.clone();
                        method.parameters = strip_initializers(&method.parameters);
                        method.override_of = Some(target);
                        MemberDecl::Method(method)
                    }
                    None => member.clone(),
                }
            }
            MemberDecl::MethodSignature(signature) => {
                match self.method_target(&MethodView::of_signature(signature), parents) {
                    Some(target) => {
                        let mut signature = signature.clone();
                        signature.parameters = strip_initializers(&signature.parameters);
                        signature.override_of = Some(target);
                        MemberDecl::MethodSignature(signature)
                    }
                    None => member.clone(),
                }
            }
            MemberDecl::Property(property) => MemberDecl::Property(PropertyDecl {
                override_of: self.property_target(property, parents),
                ..property.clone()
            }),
            MemberDecl::Class(class) => MemberDecl::Class(self.lower_class(class, owner)),
            MemberDecl::Interface(interface) => {
                MemberDecl::Interface(self.lower_interface(interface, owner))
            }
            MemberDecl::Constructor(_)
            | MemberDecl::IndexSignature(_)
            | MemberDecl::CallSignature(_) => member.clone(),
        }
    }

    /// The first ancestor (in heritage order) declaring an overridden
    /// method, else the special case, else nothing.
    pub fn method_target(
        &self,
        method: &MethodView<'_>,
        parents: &[ParentMembers<'_>],
    ) -> Option<OverrideTarget> {
        let ancestor = parents.iter().find(|parent| {
            parent
                .methods_named(method.name)
                .iter()
                .any(|candidate| self.relations.method_overrides(method, candidate))
        });
        match ancestor {
            Some(parent) => {
                debug!(method = method.name, ancestor = %parent.fq_name, "method overrides");
                Some(OverrideTarget::Ancestor {
                    fq_name: parent.fq_name.clone(),
                })
            }
            None if is_special_case(method) => Some(OverrideTarget::SpecialCase),
            None => None,
        }
    }

    pub fn property_target(
        &self,
        property: &PropertyDecl,
        parents: &[ParentMembers<'_>],
    ) -> Option<OverrideTarget> {
        parents
            .iter()
            .find(|parent| {
                parent
                    .properties_named(&property.name)
                    .iter()
                    .any(|candidate| self.relations.property_overrides(property, candidate))
            })
            .map(|parent| OverrideTarget::Ancestor {
                fq_name: parent.fq_name.clone(),
            })
    }
}

/// Overriding members may not redeclare default values.
fn strip_initializers(parameters: &[ParameterDecl]) -> Vec<ParameterDecl> {
    parameters
        .iter()
        .map(|parameter| ParameterDecl {
            initializer: None,
            ..parameter.clone()
        })
        .collect()
}
