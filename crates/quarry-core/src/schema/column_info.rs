use crate::{Error, Result, Value};

use serde_json::Map;

/// One column as reported by `PRAGMA table_info`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub cid: i64,
    pub name: String,
    pub ty: String,
    pub not_null: bool,
    pub default_value: Value,

    /// 1-based position in the primary key, 0 when not part of it
    pub primary_key: i64,
}

impl ColumnInfo {
    /// Decodes one `table_info` row keyed by column name.
    pub fn from_row(row: &Map<String, Value>) -> Result<Self> {
        let int = |key: &str| -> Result<i64> {
            row.get(key)
                .and_then(Value::as_i64)
                .ok_or_else(|| Error::invalid_result(format!("table_info row has no integer `{key}`")))
        };

        let text = |key: &str| -> Result<String> {
            match row.get(key) {
                Some(Value::String(s)) => Ok(s.clone()),
                Some(Value::Null) | None if key == "type" => Ok(String::new()),
                _ => Err(Error::invalid_result(format!(
                    "table_info row has no string `{key}`"
                ))),
            }
        };

        Ok(Self {
            cid: int("cid")?,
            name: text("name")?,
            ty: text("type")?,
            not_null: int("notnull")? != 0,
            default_value: row.get("dflt_value").cloned().unwrap_or(Value::Null),
            primary_key: int("pk")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_table_info_row() {
        let row = json!({
            "cid": 0, "name": "id", "type": "INTEGER",
            "notnull": 1, "dflt_value": null, "pk": 1
        });

        let info = ColumnInfo::from_row(row.as_object().unwrap()).unwrap();
        assert_eq!(info.name, "id");
        assert_eq!(info.ty, "INTEGER");
        assert!(info.not_null);
        assert_eq!(info.primary_key, 1);
    }

    #[test]
    fn missing_name_is_invalid_result() {
        let row = json!({ "cid": 0, "type": "TEXT", "notnull": 0, "pk": 0 });
        let err = ColumnInfo::from_row(row.as_object().unwrap()).unwrap_err();
        assert!(err.is_invalid_result());
    }
}
