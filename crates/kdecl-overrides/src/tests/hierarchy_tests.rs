use super::*;
use kdecl_model::{
    ClassDecl, Declaration, HeritageRef, InterfaceDecl, ModifierFlags, ModuleDecl, SourceFile,
    SourceSet,
};

fn class(name: &str, parents: &[&str], members: Vec<MemberDecl>) -> Declaration {
    Declaration::Class(ClassDecl {
        name: name.to_string(),
        members,
        type_parameters: Vec::new(),
        heritage: parents
            .iter()
            .map(|parent| HeritageRef::extends(TypeExpr::named(*parent)))
            .collect(),
        modifiers: ModifierFlags::empty(),
    })
}

fn interface(name: &str, parents: &[&str]) -> Declaration {
    Declaration::Interface(InterfaceDecl {
        name: name.to_string(),
        members: Vec::new(),
        type_parameters: Vec::new(),
        heritage: parents
            .iter()
            .map(|parent| HeritageRef::implements(TypeExpr::named(*parent)))
            .collect(),
    })
}

fn sources(declarations: Vec<Declaration>) -> SourceSet {
    SourceSet::new(vec![SourceFile::new(
        "index.d.ts",
        ModuleDecl::new("", declarations),
    )])
}

fn parent_names(context: &ModelContext<'_>, name: &str) -> Vec<String> {
    let resolved = context
        .resolve(&QualifiedName::ident(name))
        .expect("registered");
    known_parents(context, resolved.class_like, resolved.fq_name())
        .iter()
        .map(|parent| parent.fq_name().to_string())
        .collect()
}

#[test]
fn ancestors_are_listed_depth_first_in_heritage_order() {
    let set = sources(vec![
        interface("Root", &[]),
        interface("Left", &["Root"]),
        interface("Right", &[]),
        class("Leaf", &["Left", "Right"], Vec::new()),
    ]);
    let context = ModelContext::build(&set, None).unwrap();
    assert_eq!(parent_names(&context, "Leaf"), ["Left", "Root", "Right"]);
}

#[test]
fn diamond_ancestors_are_listed_once() {
    let set = sources(vec![
        interface("A", &[]),
        interface("B", &["A"]),
        interface("C", &["A"]),
        class("D", &["B", "C"], Vec::new()),
    ]);
    let context = ModelContext::build(&set, None).unwrap();
    assert_eq!(parent_names(&context, "D"), ["B", "A", "C"]);
}

#[test]
fn unknown_ancestors_contribute_nothing() {
    let set = sources(vec![
        interface("Known", &[]),
        class("Widget", &["HTMLElement", "Known"], Vec::new()),
    ]);
    let context = ModelContext::build(&set, None).unwrap();
    assert_eq!(parent_names(&context, "Widget"), ["Known"]);
}

#[test]
fn cyclic_heritage_terminates() {
    let set = sources(vec![
        class("Chicken", &["Egg"], Vec::new()),
        class("Egg", &["Chicken"], Vec::new()),
    ]);
    let context = ModelContext::build(&set, None).unwrap();
    assert_eq!(parent_names(&context, "Chicken"), ["Egg"]);
    assert_eq!(parent_names(&context, "Egg"), ["Chicken"]);
}

#[test]
fn self_extension_lists_no_parents() {
    let set = sources(vec![class("Ouroboros", &["Ouroboros"], Vec::new())]);
    let context = ModelContext::build(&set, None).unwrap();
    assert!(parent_names(&context, "Ouroboros").is_empty());
}

#[test]
fn parent_members_group_overloads_by_name() {
    let method = |ty: &str| {
        MemberDecl::Method(FunctionDecl::new(
            "add",
            vec![ParameterDecl::new("value", TypeExpr::named(ty))],
            TypeExpr::named("Unit"),
        ))
    };
    let set = sources(vec![
        class(
            "Collection",
            &[],
            vec![
                method("Number"),
                method("String"),
                MemberDecl::Property(PropertyDecl::new("size", TypeExpr::named("Number"))),
            ],
        ),
        class("Bag", &["Collection"], Vec::new()),
    ]);
    let context = ModelContext::build(&set, None).unwrap();
    let bag = context.resolve(&QualifiedName::ident("Bag")).unwrap();
    let members = all_parent_members(&context, bag.class_like, bag.fq_name());

    assert_eq!(members.len(), 1);
    assert!(members[0].fq_name.is_ident("Collection"));
    assert_eq!(members[0].methods_named("add").len(), 2);
    assert_eq!(members[0].properties_named("size").len(), 1);
    assert!(members[0].methods_named("remove").is_empty());
}
