use quarry_core::{Error, FieldSet, Result, Value};

/// Columns returned by a query; empty means every column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub columns: Vec<String>,
}

impl Projection {
    /// Parses `{ field: true, other: false }`.
    pub fn parse(input: &Value, fields: &FieldSet, table: &str) -> Result<Projection> {
        let map = match input {
            Value::Null => return Ok(Projection::default()),
            Value::Object(map) => map,
            other => {
                return Err(Error::invalid_statement(format!(
                    "`select` expects an object; got `{other}`"
                )))
            }
        };

        let mut columns = vec![];

        for (field, include) in map {
            if !fields.contains(field) {
                return Err(Error::schema_mismatch(table, field));
            }

            match include {
                Value::Bool(true) => columns.push(field.clone()),
                Value::Bool(false) => {}
                other => {
                    return Err(Error::invalid_statement(format!(
                        "`select.{field}` expects a boolean; got `{other}`"
                    )))
                }
            }
        }

        Ok(Projection { columns })
    }

    pub fn is_all(&self) -> bool {
        self.columns.is_empty()
    }
}
