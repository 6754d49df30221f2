//! Tests for reading the upstream declaration model from JSON.

use kdecl_common::LoweringError;
use kdecl_model::{Declaration, Expression, MemberDecl, SourceSet, TypeExpr};
use serde_json::json;

fn source_set_with_parameter(initializer: serde_json::Value) -> serde_json::Value {
    json!({
        "sources": [{
            "fileName": "shapes.d.ts",
            "root": {
                "name": "shapes",
                "declarations": [{
                    "reflection": "FunctionDeclaration",
                    "name": "area",
                    "parameters": [{
                        "name": "radius",
                        "type": { "reflection": "TypeValue", "name": "Number" },
                        "initializer": initializer
                    }],
                    "type": { "reflection": "Dynamic" }
                }]
            }
        }]
    })
}

#[test]
fn defined_externally_initializer_is_accepted() {
    let value = source_set_with_parameter(json!({ "reflection": "DefinedExternally" }));
    let source_set = SourceSet::from_json_value(value).expect("valid model");

    let Declaration::Function(function) = &source_set.sources[0].root.declarations[0] else {
        panic!("expected a function");
    };
    assert_eq!(
        function.parameters[0].initializer,
        Some(Expression::DefinedExternally)
    );
}

#[test]
fn other_initializer_is_malformed() {
    let value = source_set_with_parameter(json!({
        "reflection": "Literal",
        "value": { "kind": "Number", "value": "3" }
    }));
    let err = SourceSet::from_json_value(value).expect_err("literal initializer");

    match err {
        LoweringError::MalformedInitializer { parameter, found } => {
            assert_eq!(parameter, "radius");
            assert_eq!(found, "Literal");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_initializer_inside_class_method_is_reported() {
    let text = r#"{
        "sources": [{
            "fileName": "lib.d.ts",
            "root": {
                "declarations": [{
                    "reflection": "ClassDeclaration",
                    "name": "Box",
                    "members": [{
                        "reflection": "FunctionDeclaration",
                        "name": "resize",
                        "parameters": [{
                            "name": "by",
                            "type": { "reflection": "Dynamic" },
                            "initializer": { "reflection": "Identifier", "name": "DEFAULT" }
                        }],
                        "type": { "reflection": "Dynamic" }
                    }]
                }]
            }
        }]
    }"#;
    let err = SourceSet::from_json_str(text).expect_err("identifier initializer");
    assert_eq!(err.category(), "malformed-initializer");
}

#[test]
fn malformed_initializer_inside_constructor_body_is_reported() {
    let text = r#"{
        "sources": [{
            "fileName": "lib.d.ts",
            "root": {
                "declarations": [{
                    "reflection": "ClassDeclaration",
                    "name": "Box",
                    "members": [{
                        "reflection": "ConstructorDeclaration",
                        "parameters": [],
                        "body": { "statements": [{
                            "reflection": "FunctionDeclaration",
                            "name": "helper",
                            "parameters": [{
                                "name": "size",
                                "type": { "reflection": "Dynamic" },
                                "initializer": { "reflection": "Identifier", "name": "DEFAULT" }
                            }],
                            "type": { "reflection": "Dynamic" }
                        }]}
                    }]
                }]
            }
        }]
    }"#;
    let err = SourceSet::from_json_str(text).expect_err("identifier initializer in constructor body");
    assert!(matches!(
        err,
        LoweringError::MalformedInitializer { ref parameter, .. } if parameter == "size"
    ));
}

#[test]
fn heritage_and_members_round_out_a_class() {
    let text = r#"{
        "sources": [{
            "fileName": "lib.d.ts",
            "root": {
                "name": "lib",
                "declarations": [{
                    "reflection": "ClassDeclaration",
                    "name": "Circle",
                    "parentEntities": [
                        { "type": { "reflection": "TypeValue", "name": "lib.Shape" }, "extending": true }
                    ],
                    "members": [{
                        "reflection": "PropertyDeclaration",
                        "name": "radius",
                        "type": { "reflection": "TypeValue", "name": "Number" },
                        "modifiers": "READONLY"
                    }]
                }]
            }
        }]
    }"#;
    let source_set = SourceSet::from_json_str(text).expect("valid model");
    let Declaration::Class(class) = &source_set.sources[0].root.declarations[0] else {
        panic!("expected a class");
    };
    assert!(class.heritage[0].extending);
    assert_eq!(class.heritage[0].ty, TypeExpr::named("lib.Shape"));
    assert!(matches!(&class.members[0], MemberDecl::Property(p) if p.name == "radius"));
}

#[test]
fn unknown_reflection_tag_is_a_json_error() {
    let text = r#"{ "sources": [{ "fileName": "a.d.ts", "root": {
        "declarations": [{ "reflection": "DecoratorDeclaration" }] } }] }"#;
    let err = SourceSet::from_json_str(text).expect_err("unknown tag");
    assert!(matches!(err, LoweringError::Json(_)));
}
