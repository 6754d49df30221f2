use super::*;
use kdecl_model::{
    ClassDecl, Declaration, HeritageRef, ModifierFlags, ModuleDecl, SourceFile, SourceSet,
    TypeParameterDecl,
};

fn class(name: &str, parents: &[&str], type_parameters: &[&str]) -> Declaration {
    Declaration::Class(ClassDecl {
        name: name.to_string(),
        members: Vec::new(),
        type_parameters: type_parameters
            .iter()
            .map(|name| TypeParameterDecl {
                name: name.to_string(),
                constraints: Vec::new(),
            })
            .collect(),
        heritage: parents
            .iter()
            .map(|parent| HeritageRef::extends(TypeExpr::named(*parent)))
            .collect(),
        modifiers: ModifierFlags::empty(),
    })
}

/// `Base`, `Derived : Base`, generic `Array<T>` and `List<T>`.
fn hierarchy() -> SourceSet {
    SourceSet::new(vec![SourceFile::new(
        "lib.d.ts",
        ModuleDecl::new(
            "",
            vec![
                class("Base", &[], &[]),
                class("Derived", &["Base"], &[]),
                class("Array", &[], &["T"]),
                class("List", &[], &["T"]),
            ],
        ),
    )])
}

fn named(name: &str) -> TypeExpr {
    TypeExpr::named(name)
}

fn array_of(element: TypeExpr) -> TypeExpr {
    TypeExpr::generic(well_known::ARRAY, vec![element])
}

fn list_of(element: TypeExpr) -> TypeExpr {
    TypeExpr::generic("List", vec![element])
}

fn sample_types() -> Vec<TypeExpr> {
    vec![
        named("Base"),
        named("Derived").with_nullable(true),
        TypeExpr::nullable_any(),
        array_of(named("Derived")),
        list_of(named("Base")),
        TypeExpr::function(vec![named("Base")], named("Unit")),
        TypeExpr::type_parameter("T"),
        TypeExpr::union(vec![named("String"), named("Number")]),
        TypeExpr::Dynamic,
    ]
}

#[test]
fn dynamic_overrides_and_is_overridden_by_everything() {
    let set = hierarchy();
    let context = ModelContext::build(&set, None).unwrap();
    let relations = TypeRelations::new(&context);
    for ty in sample_types() {
        assert!(relations.is_overriding(&TypeExpr::Dynamic, &ty), "dynamic vs {ty:?}");
        assert!(relations.is_overriding(&ty, &TypeExpr::Dynamic), "{ty:?} vs dynamic");
    }
}

#[test]
fn equivalence_is_symmetric_for_nominal_and_function_types() {
    let set = hierarchy();
    let context = ModelContext::build(&set, None).unwrap();
    let relations = TypeRelations::new(&context);
    let pairs = [
        (named("Base"), named("Base")),
        (named("Base"), named("Derived")),
        (named("Base"), named("Base").with_nullable(true)),
        (list_of(named("Base")), list_of(TypeExpr::Dynamic)),
        (list_of(named("Base")), list_of(named("Derived"))),
        (
            TypeExpr::function(vec![named("Base")], named("Unit")),
            TypeExpr::function(vec![TypeExpr::Dynamic], named("Unit")),
        ),
        (
            TypeExpr::function(vec![named("Base")], named("Unit")),
            TypeExpr::function(vec![named("Derived")], named("Unit")),
        ),
        (
            TypeExpr::function(Vec::new(), named("Unit")),
            named(well_known::FUNCTION),
        ),
    ];
    for (a, b) in &pairs {
        assert_eq!(
            relations.is_equivalent(a, b),
            relations.is_equivalent(b, a),
            "{a:?} / {b:?}"
        );
    }
    assert!(relations.is_equivalent(&pairs[0].0, &pairs[0].1));
    assert!(!relations.is_equivalent(&pairs[1].0, &pairs[1].1));
    assert!(!relations.is_equivalent(&pairs[2].0, &pairs[2].1));
    assert!(relations.is_equivalent(&pairs[3].0, &pairs[3].1));
    assert!(relations.is_equivalent(&pairs[5].0, &pairs[5].1));
    assert!(relations.is_equivalent(&pairs[7].0, &pairs[7].1));
}

#[test]
fn subtype_overrides_supertype_but_not_the_reverse() {
    let set = hierarchy();
    let context = ModelContext::build(&set, None).unwrap();
    let relations = TypeRelations::new(&context);
    assert!(relations.is_overriding(&named("Derived"), &named("Base")));
    assert!(!relations.is_overriding(&named("Base"), &named("Derived")));
}

#[test]
fn anything_overrides_any_outside_invariant_arguments() {
    let set = hierarchy();
    let context = ModelContext::build(&set, None).unwrap();
    let relations = TypeRelations::new(&context);
    let any = named(well_known::ANY);
    assert!(relations.is_overriding(&named("String"), &any));
    assert!(relations.is_overriding(&array_of(named("String")), &array_of(any.clone())));
    assert!(!relations.is_overriding(&list_of(named("String")), &list_of(any.clone())));
    assert!(relations.is_overriding(&list_of(TypeExpr::type_parameter("T")), &list_of(any)));
}

#[test]
fn arrays_are_covariant_and_other_generics_are_not() {
    let set = hierarchy();
    let context = ModelContext::build(&set, None).unwrap();
    let relations = TypeRelations::new(&context);
    assert!(relations.is_overriding(&array_of(named("Derived")), &array_of(named("Base"))));
    assert!(!relations.is_overriding(&array_of(named("Base")), &array_of(named("Derived"))));
    assert!(!relations.is_overriding(&list_of(named("Derived")), &list_of(named("Base"))));
}

#[test]
fn unknown_nominal_types_only_override_themselves() {
    let set = hierarchy();
    let context = ModelContext::build(&set, None).unwrap();
    let relations = TypeRelations::new(&context);
    assert!(relations.is_overriding(&named("Foreign"), &named("Foreign")));
    assert!(!relations.is_overriding(&named("Foreign"), &named("Base")));
}

#[test]
fn special_cases_match_universal_methods_only() {
    let nullable_any = [ParameterDecl::new("other", TypeExpr::nullable_any())];
    let strict_any = [ParameterDecl::new("other", named(well_known::ANY))];
    let number = named(well_known::NUMBER);
    let string = named(well_known::STRING);
    fn view<'a>(
        name: &'a str,
        parameters: &'a [ParameterDecl],
        return_type: &'a TypeExpr,
    ) -> MethodView<'a> {
        MethodView {
            name,
            parameters,
            return_type,
            type_parameter_count: 0,
        }
    }

    assert!(is_special_case(&view("equals", &nullable_any, &number)));
    assert!(!is_special_case(&view("equals", &strict_any, &number)));
    assert!(is_special_case(&view("hashCode", &[], &number)));
    assert!(!is_special_case(&view("hashCode", &[], &string)));
    assert!(is_special_case(&view("toString", &[], &number)));
    assert!(!is_special_case(&view("toString", &nullable_any, &string)));
    assert!(!is_special_case(&view("valueOf", &[], &number)));
}
