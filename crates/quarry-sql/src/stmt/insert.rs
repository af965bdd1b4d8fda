use super::Statement;

use indexmap::IndexMap;
use quarry_core::{Error, FieldSet, Result, Value};

/// Inserts a single row.
#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    pub table: String,

    /// Column values, in caller order. Empty inserts a row of defaults.
    pub values: IndexMap<String, Value>,
}

impl Insert {
    /// Parses a caller-supplied data object.
    pub fn parse(input: &Value, fields: &FieldSet, table: &str) -> Result<Insert> {
        let Value::Object(map) = input else {
            return Err(Error::invalid_statement(format!(
                "insert data must be an object; got `{input}`"
            )));
        };

        let mut values = IndexMap::with_capacity(map.len());

        for (column, value) in map {
            if !fields.contains(column) {
                return Err(Error::schema_mismatch(table, column));
            }

            values.insert(column.clone(), value.clone());
        }

        Ok(Insert {
            table: table.to_string(),
            values,
        })
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Self::Insert(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_caller_order() {
        let insert = Insert::parse(
            &json!({ "name": "a", "age": 3 }),
            &FieldSet::new(["age", "name"]),
            "users",
        )
        .unwrap();

        assert_eq!(
            insert.values.keys().collect::<Vec<_>>(),
            ["name", "age"]
        );
    }

    #[test]
    fn rejects_unknown_columns_and_non_objects() {
        let fields = FieldSet::new(["name"]);
        assert!(Insert::parse(&json!({ "nam": 1 }), &fields, "users")
            .unwrap_err()
            .is_schema_mismatch());
        assert!(Insert::parse(&json!([1]), &fields, "users")
            .unwrap_err()
            .is_invalid_statement());
    }
}
