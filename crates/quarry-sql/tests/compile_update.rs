use pretty_assertions::assert_eq;
use quarry_core::FieldSet;
use quarry_sql::{compile_update, Compiled};
use serde_json::json;

fn fields() -> FieldSet {
    FieldSet::new(["balance", "name", "visits"])
}

fn normalize(compiled: &Compiled) -> String {
    let mut sql = compiled.sql.clone();
    for (i, name) in compiled.params.names().enumerate() {
        sql = sql.replace(&format!(":{name}"), &format!(":p{i}"));
    }
    sql
}

#[test]
fn literals_and_counters() {
    let compiled = compile_update(
        &json!({
            "name": "ann",
            "visits": { "increment": 1 },
            "balance": { "decrement": 2.5 },
        }),
        &fields(),
        "accounts",
    )
    .unwrap();

    assert_eq!(
        normalize(&compiled),
        r#""name" = :p0, "visits" = "visits" + :p1, "balance" = "balance" - :p2"#
    );
    assert_eq!(
        compiled.params.values().collect::<Vec<_>>(),
        [&json!("ann"), &json!(1), &json!(2.5)]
    );
}

#[test]
fn math_arguments_are_renamed() {
    let compiled = compile_update(
        &json!({
            "balance": { "math": "\"balance\" * :x + :y", "args": { "x": 2, "y": 50 } },
        }),
        &fields(),
        "accounts",
    )
    .unwrap();

    assert_eq!(normalize(&compiled), r#""balance" = "balance" * :p0 + :p1"#);
    assert_eq!(
        compiled.params.values().collect::<Vec<_>>(),
        [&json!(2), &json!(50)]
    );

    for name in compiled.params.names() {
        assert_ne!(name, "x");
        assert_ne!(name, "y");
    }
}

#[test]
fn math_binds_only_referenced_arguments() {
    let compiled = compile_update(
        &json!({
            "balance": {
                "math": "\"balance\" + :xy - :x + :x",
                "args": { "x": 1, "xy": 2, "unused": 3 },
            },
        }),
        &fields(),
        "accounts",
    )
    .unwrap();

    assert_eq!(
        normalize(&compiled),
        r#""balance" = "balance" + :p0 - :p1 + :p1"#
    );
    assert_eq!(
        compiled.params.values().collect::<Vec<_>>(),
        [&json!(2), &json!(1)]
    );
}

#[test]
fn unsafe_math_produces_nothing() {
    let err = compile_update(
        &json!({ "name": "x", "balance": { "math": "1; DROP TABLE users" } }),
        &fields(),
        "accounts",
    )
    .unwrap_err();

    assert!(err.is_unsafe_expression());
    assert!(err.to_string().contains("balance"));
}

#[test]
fn blocklisted_keyword_without_bad_characters() {
    let err = compile_update(
        &json!({ "balance": { "math": "(SELECT 1)" } }),
        &fields(),
        "accounts",
    )
    .unwrap_err();

    assert!(err.is_unsafe_expression());
}

#[test]
fn json_document_is_bound_as_text() {
    let compiled = compile_update(
        &json!({ "name": { "first": "a" } }),
        &fields(),
        "accounts",
    )
    .unwrap();

    assert_eq!(
        compiled.params.values().collect::<Vec<_>>(),
        [&json!("{\"first\":\"a\"}")]
    );
}
