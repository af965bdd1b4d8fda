use quarry_core::{Error, FieldSet, Result, Value};

/// `ORDER BY` terms, in priority order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy {
    pub terms: Vec<(String, Direction)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl OrderBy {
    /// Parses `{ field: "asc" | "desc" }` or an array of such objects.
    pub fn parse(input: &Value, fields: &FieldSet, table: &str) -> Result<OrderBy> {
        let mut terms = vec![];

        match input {
            Value::Null => {}
            Value::Object(_) => push_terms(input, fields, table, &mut terms)?,
            Value::Array(items) => {
                for item in items {
                    push_terms(item, fields, table, &mut terms)?;
                }
            }
            other => {
                return Err(Error::invalid_statement(format!(
                    "`orderBy` expects an object or an array of objects; got `{other}`"
                )))
            }
        }

        Ok(OrderBy { terms })
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn push_terms(
    input: &Value,
    fields: &FieldSet,
    table: &str,
    dst: &mut Vec<(String, Direction)>,
) -> Result<()> {
    let Value::Object(map) = input else {
        return Err(Error::invalid_statement(format!(
            "`orderBy` entries must be objects; got `{input}`"
        )));
    };

    for (field, direction) in map {
        if !fields.contains(field) {
            return Err(Error::schema_mismatch(table, field));
        }

        dst.push((field.clone(), Direction::parse(field, direction)?));
    }

    Ok(())
}

impl Direction {
    fn parse(field: &str, value: &Value) -> Result<Direction> {
        match value {
            Value::String(s) if s.eq_ignore_ascii_case("asc") => Ok(Direction::Asc),
            Value::String(s) if s.eq_ignore_ascii_case("desc") => Ok(Direction::Desc),
            Value::String(s) => Err(Error::invalid_order_direction(field, s.as_str())),
            other => Err(Error::invalid_order_direction(field, other.to_string())),
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}
