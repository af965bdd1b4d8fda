use quarry_core::{FieldSet, Value};
use quarry_sql::{stmt::Select, OrderBy, Pagination, Serializer};
use serde_json::json;

#[test]
fn order_and_page() {
    let fields = FieldSet::new(["name", "age"]);
    let order_by = OrderBy::parse(&json!([{ "age": "DESC" }, { "name": "asc" }]), &fields, "users")
        .unwrap();
    let pagination = Pagination::parse(Some(&json!(10)), Some(&json!(30))).unwrap();

    let compiled = Serializer::new().serialize(
        &Select::new("users")
            .order_by(order_by)
            .pagination(pagination)
            .into(),
    );

    assert_eq!(
        compiled.sql,
        r#"SELECT * FROM "users" ORDER BY "age" DESC, "name" ASC LIMIT 10 OFFSET 30"#
    );
    assert!(compiled.params.is_empty());
}

#[test]
fn invalid_inputs() {
    let fields = FieldSet::new(["name"]);

    assert!(OrderBy::parse(&json!({ "name": "up" }), &fields, "users")
        .unwrap_err()
        .is_invalid_order_direction());

    for limit in [json!(-1), json!(0.5), json!("5"), json!(true)] {
        let err = Pagination::parse(Some(&limit), None).unwrap_err();
        assert!(err.is_invalid_pagination(), "{limit}");
    }

    assert_eq!(
        Pagination::parse(Some(&Value::Null), Some(&json!(0))).unwrap(),
        Pagination {
            limit: None,
            offset: Some(0)
        }
    );
}
