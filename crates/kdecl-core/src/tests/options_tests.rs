use super::*;

#[test]
fn empty_object_yields_defaults() {
    let options = LoweringOptions::from_json_str("{}").unwrap();
    assert_eq!(options, LoweringOptions::default());
    assert_eq!(options.declaration_suffixes, [".d.ts"]);
    assert!(!options.parallel);
    assert!(!options.fallback_on_unsupported);
}

#[test]
fn fields_are_camel_case() {
    let options = LoweringOptions::from_json_str(
        r#"{"declarationSuffixes": [".d.ts", ".d.mts"], "parallel": true, "fallbackOnUnsupported": true}"#,
    )
    .unwrap();
    assert_eq!(options.declaration_suffixes, [".d.ts", ".d.mts"]);
    assert!(options.parallel);
    assert!(options.fallback_on_unsupported);
}

#[test]
fn malformed_options_are_rejected() {
    assert!(LoweringOptions::from_json_str(r#"{"parallel": "yes"}"#).is_err());
}
