use kdecl_common::LoweringError;
use kdecl_infer::{infer_function, introduce_types_in_module, introduce_types_in_source_set};
use kdecl_model::{
    BinaryOperator, ClassDecl, ConstructorDecl, Declaration, Expression, FunctionDecl,
    IfStatement, MemberDecl, ModifierFlags, ModuleDecl, ParameterDecl, SourceFile, SourceSet,
    TypeExpr, well_known,
};

const DECLARATION_SUFFIXES: &[&str] = &[".d.ts"];

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn number() -> TypeExpr {
    TypeExpr::named(well_known::NUMBER)
}

fn string() -> TypeExpr {
    TypeExpr::named(well_known::STRING)
}

fn untyped(name: &str) -> ParameterDecl {
    ParameterDecl::new(name, TypeExpr::Dynamic)
}

/// `function double(x) { return x * 2; }`
fn double() -> FunctionDecl {
    FunctionDecl::new("double", vec![untyped("x")], TypeExpr::Dynamic).with_body(vec![
        Declaration::returning(Expression::binary(
            BinaryOperator::Multiply,
            Expression::identifier("x"),
            Expression::number("2"),
        )),
    ])
}

#[test]
fn function_without_body_is_unchanged() {
    let function = FunctionDecl::new("parse", vec![untyped("text")], TypeExpr::Dynamic);
    assert_eq!(infer_function(&function).unwrap(), function);
}

#[test]
fn parameter_and_return_types_are_inferred() {
    init_tracing();
    let inferred = infer_function(&double()).unwrap();
    assert_eq!(inferred.parameters[0].ty, number());
    assert_eq!(inferred.return_type, number());
    assert_eq!(inferred.name, "double");
}

#[test]
fn rebinding_a_parameter_name_does_not_retype_the_parameter() {
    // function f(x) { var x = "s"; x - 1; return x; }
    let function = FunctionDecl::new("f", vec![untyped("x")], TypeExpr::Dynamic).with_body(vec![
        Declaration::variable("x", Expression::string("s")),
        Declaration::expression(Expression::binary(
            BinaryOperator::Subtract,
            Expression::identifier("x"),
            Expression::number("1"),
        )),
        Declaration::returning(Expression::identifier("x")),
    ]);
    let inferred = infer_function(&function).unwrap();
    assert_eq!(inferred.parameters[0].ty, TypeExpr::Dynamic);
    assert_eq!(
        inferred.return_type,
        TypeExpr::union(vec![string(), number()])
    );
}

#[test]
fn last_return_wins() {
    let function = FunctionDecl::new("pick", Vec::new(), TypeExpr::Dynamic).with_body(vec![
        Declaration::returning(Expression::number("1")),
        Declaration::returning(Expression::string("one")),
    ]);
    assert_eq!(infer_function(&function).unwrap().return_type, string());
}

#[test]
fn body_without_return_has_dynamic_return_type() {
    let function = FunctionDecl::new("touch", vec![untyped("node")], TypeExpr::Dynamic)
        .with_body(vec![Declaration::expression(Expression::property(
            Expression::identifier("node"),
            "parent",
        ))]);
    let inferred = infer_function(&function).unwrap();
    assert_eq!(inferred.return_type, TypeExpr::Dynamic);
    assert_eq!(inferred.parameters[0].ty, TypeExpr::named(well_known::ANY));
}

#[test]
fn control_flow_statement_in_body_is_unsupported() {
    init_tracing();
    let function = FunctionDecl::new("branch", vec![untyped("x")], TypeExpr::Dynamic).with_body(
        vec![Declaration::If(IfStatement {
            condition: Expression::identifier("x"),
            then_statement: Box::new(Declaration::returning(Expression::number("1"))),
            else_statement: None,
        })],
    );
    let error = infer_function(&function).unwrap_err();
    assert!(matches!(
        error,
        LoweringError::UnsupportedStatement { ref function, kind: "IfStatement" } if function == "branch"
    ));
    assert_eq!(error.category(), "unsupported-construct");
}

#[test]
fn control_flow_at_top_level_is_unexpected() {
    let module = ModuleDecl::new(
        "",
        vec![Declaration::Throw(kdecl_model::ThrowStatement {
            expression: Expression::string("boom"),
        })],
    );
    let error = introduce_types_in_module(&module).unwrap_err();
    assert!(matches!(
        error,
        LoweringError::UnexpectedTopLevel {
            kind: "ThrowStatement"
        }
    ));
}

#[test]
fn class_methods_and_constructors_are_inferred() {
    init_tracing();
    let constructor = ConstructorDecl {
        parameters: vec![untyped("label")],
        type_parameters: Vec::new(),
        modifiers: ModifierFlags::empty(),
        body: Some(kdecl_model::BlockDecl {
            statements: vec![Declaration::expression(Expression::binary(
                BinaryOperator::Add,
                Expression::identifier("label"),
                Expression::string(":"),
            ))],
        }),
    };
    let class = ClassDecl {
        name: "Counter".to_string(),
        members: vec![
            MemberDecl::Constructor(constructor),
            MemberDecl::Method(double()),
        ],
        type_parameters: Vec::new(),
        heritage: Vec::new(),
        modifiers: ModifierFlags::empty(),
    };
    let module = ModuleDecl::new("", vec![Declaration::Class(class)]);
    let lowered = introduce_types_in_module(&module).unwrap();

    let Declaration::Class(class) = &lowered.declarations[0] else {
        panic!("expected a class, got {:?}", lowered.declarations[0]);
    };
    // `label + ":"` concatenates but puts no evidence on `label` itself.
    let MemberDecl::Constructor(constructor) = &class.members[0] else {
        panic!("expected a constructor");
    };
    assert_eq!(constructor.parameters[0].ty, TypeExpr::Dynamic);
    let MemberDecl::Method(method) = &class.members[1] else {
        panic!("expected a method");
    };
    assert_eq!(method.return_type, number());
}

#[test]
fn nested_modules_and_blocks_are_visited() {
    let inner = ModuleDecl::new("lib.util", vec![Declaration::Function(double())]);
    let block = Declaration::Block(kdecl_model::BlockDecl {
        statements: vec![Declaration::Function(double())],
    });
    let module = ModuleDecl::new("lib", vec![block]).with_submodules(vec![inner]);
    let lowered = introduce_types_in_module(&module).unwrap();

    let Declaration::Block(block) = &lowered.declarations[0] else {
        panic!("expected a block");
    };
    let Declaration::Function(in_block) = &block.statements[0] else {
        panic!("expected a function");
    };
    assert_eq!(in_block.return_type, number());
    let Declaration::Function(in_submodule) = &lowered.submodules[0].declarations[0] else {
        panic!("expected a function");
    };
    assert_eq!(in_submodule.return_type, number());
}

#[test]
fn only_declaration_sources_are_transformed() {
    let module = ModuleDecl::new("", vec![Declaration::Function(double())]);
    let set = SourceSet::new(vec![
        SourceFile::new("index.d.ts", module.clone()),
        SourceFile::new("index.js", module.clone()),
    ]);
    let lowered = introduce_types_in_source_set(&set, DECLARATION_SUFFIXES).unwrap();

    let Declaration::Function(declared) = &lowered.sources[0].root.declarations[0] else {
        panic!("expected a function");
    };
    assert_eq!(declared.return_type, number());
    assert_eq!(lowered.sources[1], set.sources[1]);
}

#[test]
fn inference_is_stable_on_its_own_output() {
    let module = ModuleDecl::new("", vec![Declaration::Function(double())]);
    let once = introduce_types_in_module(&module).unwrap();
    let twice = introduce_types_in_module(&once).unwrap();
    assert_eq!(once, twice);
}
