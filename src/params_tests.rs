use super::*;
use serde_json::json;

fn payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object payload"),
    }
}

fn to_payload(bundle: &ArgBundle) -> Value {
    let mut value = json!({
        "filename": bundle.filename,
        "platforms": bundle.platforms,
        "repo": bundle.repo,
        "tag": bundle.tag,
    });
    if let Some(variants) = &bundle.variants {
        value["variants"] = json!(variants);
    }
    value
}

fn resolve(value: Value) -> Result<ArgBundle, ParamsError> {
    let fields = NormalizedFields::from_payload(&payload(value));
    ArgBundle::resolve(fields, &BuildDefaults::default())
}

#[test]
fn normalize_value_trims_and_keeps_case() {
    assert_eq!(
        normalize_value(Some(&json!("  Dockerfile.Slim \n"))),
        Some("Dockerfile.Slim".to_string())
    );
}

#[test]
fn normalize_value_unsets_blank_false_and_non_strings() {
    for value in [
        json!(""),
        json!("   "),
        json!("false"),
        json!(" FALSE "),
        json!("False"),
        json!(false),
        json!(true),
        json!(42),
        json!(null),
        json!(["a"]),
        json!({"a": "b"}),
    ] {
        assert_eq!(normalize_value(Some(&value)), None, "value {value}");
    }
    assert_eq!(normalize_value(None), None);
}

#[test]
fn missing_filename_is_fatal() {
    let err = resolve(json!({"tag": "v1"})).expect_err("missing filename");
    assert_eq!(err, ParamsError::MissingField("filename"));
    assert_eq!(err.to_string(), "filename not defined");
}

#[test]
fn blank_or_false_filename_is_fatal() {
    for filename in [json!("  "), json!("false"), json!(7)] {
        let err = resolve(json!({"filename": filename, "tag": "v1"})).expect_err("blank filename");
        assert_eq!(err, ParamsError::MissingField("filename"));
    }
}

#[test]
fn filename_is_checked_before_tag() {
    let err = resolve(json!({})).expect_err("empty payload");
    assert_eq!(err, ParamsError::MissingField("filename"));
}

#[test]
fn missing_or_blank_tag_is_fatal() {
    for value in [
        json!({"filename": "Dockerfile"}),
        json!({"filename": "Dockerfile", "tag": " "}),
        json!({"filename": "Dockerfile", "tag": "FALSE"}),
    ] {
        let err = resolve(value).expect_err("missing tag");
        assert_eq!(err, ParamsError::MissingField("tag"));
        assert_eq!(err.to_string(), "tag not defined");
    }
}

#[test]
fn defaults_fill_platforms_and_repo_but_not_variants() {
    let bundle = resolve(json!({"filename": "Dockerfile", "tag": "1.2.3"})).expect("resolve");
    assert_eq!(bundle.platforms, "linux/amd64,linux/arm64");
    assert_eq!(bundle.repo, "versatiles");
    assert_eq!(bundle.variants, None);
    assert_eq!(bundle.variants_or(""), "");
}

#[test]
fn false_variants_are_unset() {
    let bundle = resolve(json!({
        "filename": "Dockerfile",
        "tag": "1.2.3",
        "variants": "false",
        "platforms": "false",
    }))
    .expect("resolve");
    assert_eq!(bundle.variants, None);
    assert_eq!(bundle.platforms, "linux/amd64,linux/arm64");
}

#[test]
fn supplied_values_win_over_defaults() {
    let bundle = resolve(json!({
        "filename": " docker/Dockerfile ",
        "platforms": "linux/amd64",
        "repo": "MyRepo",
        "tag": " v1 ",
        "variants": "Slim, FULL",
    }))
    .expect("resolve");
    assert_eq!(
        bundle,
        ArgBundle {
            filename: "docker/Dockerfile".to_string(),
            platforms: "linux/amd64".to_string(),
            repo: "MyRepo".to_string(),
            tag: "v1".to_string(),
            variants: Some("Slim, FULL".to_string()),
        }
    );
}

#[test]
fn renormalizing_a_bundle_is_idempotent() {
    let first = resolve(json!({
        "filename": "  Dockerfile ",
        "repo": "tiles",
        "tag": "v3",
        "variants": " slim ",
    }))
    .expect("resolve");
    let second = resolve(to_payload(&first)).expect("resolve again");
    assert_eq!(first, second);
}

#[test]
fn unrecognized_keys_are_ignored() {
    let bundle = resolve(json!({
        "filename": "Dockerfile",
        "tag": "v1",
        "push": true,
    }))
    .expect("resolve");
    assert_eq!(bundle.filename, "Dockerfile");
}

#[test]
fn custom_defaults_are_applied() {
    let defaults = BuildDefaults {
        platforms: "linux/arm64".to_string(),
        repo: "tiles".to_string(),
        variants: "slim".to_string(),
        organizations: vec!["example".to_string()],
    };
    let bundle =
        ArgBundle::from_payload_str(r#"{"filename":"Dockerfile","tag":"v1"}"#, &defaults)
            .expect("resolve");
    assert_eq!(bundle.platforms, "linux/arm64");
    assert_eq!(bundle.repo, "tiles");
    assert_eq!(bundle.variants_or(&defaults.variants), "slim");
}

#[test]
fn malformed_payload_is_invalid_input() {
    let err = ArgBundle::from_payload_str("{filename:", &BuildDefaults::default())
        .expect_err("malformed payload");
    assert!(matches!(err, ParamsError::InvalidInput(_)));
    assert!(err.to_string().starts_with("invalid payload: not valid JSON"));
}

#[test]
fn non_object_payload_is_invalid_input() {
    let err = parse_payload(r#"["Dockerfile", "v1"]"#).expect_err("array payload");
    assert_eq!(
        err,
        ParamsError::InvalidInput("expected a JSON object, got an array".to_string())
    );
}
