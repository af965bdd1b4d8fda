use quarry_core::{Error, FieldSet, Result, Value};

use serde_json::Map;

/// A boolean expression over a table's columns.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// All operands hold. An empty conjunction is always true.
    And(Vec<Filter>),

    /// At least one operand holds. An empty disjunction is always false.
    Or(Vec<Filter>),

    /// The operand does not hold.
    Not(Box<Filter>),

    /// A single predicate on one column.
    Field(FieldCondition),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    pub field: String,
    pub op: Op,
}

/// Comparison applied by a [`FieldCondition`].
///
/// Comparison values are always scalars; `NULL` tests are expressed with
/// [`Op::IsNull`] only.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Equals(Value),
    Not(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Contains(String),
    StartsWith(String),
    EndsWith(String),
    In(Vec<Value>),
    NotIn(Vec<Value>),

    /// `true` for `IS NULL`, `false` for `IS NOT NULL`
    IsNull(bool),
}

impl Filter {
    /// The always-true filter.
    pub fn empty() -> Self {
        Filter::And(vec![])
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Filter::And(operands) if operands.is_empty())
    }

    pub fn field(field: impl Into<String>, op: Op) -> Self {
        Filter::Field(FieldCondition {
            field: field.into(),
            op,
        })
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::field(field, Op::Equals(value.into()))
    }

    /// Returns the value of a plain equality on `field` in the top-level
    /// conjunction, if there is one.
    pub fn equality_on(&self, field: &str) -> Option<&Value> {
        match self {
            Filter::Field(cond) if cond.field == field => match &cond.op {
                Op::Equals(value) => Some(value),
                _ => None,
            },
            Filter::And(operands) => operands.iter().find_map(|op| op.equality_on(field)),
            _ => None,
        }
    }

    /// Parses a caller-supplied `where` object.
    ///
    /// Keys are field names or the logical combinators `AND`, `OR` and `NOT`;
    /// all keys of one object are combined by conjunction.
    pub fn parse(input: &Value, fields: &FieldSet, table: &str) -> Result<Filter> {
        Parser { fields, table }.parse(input)
    }
}

struct Parser<'a> {
    fields: &'a FieldSet,
    table: &'a str,
}

impl Parser<'_> {
    fn parse(&self, input: &Value) -> Result<Filter> {
        match input {
            Value::Null => Ok(Filter::empty()),
            Value::Object(map) => self.parse_object(map),
            other => Err(Error::invalid_statement(format!(
                "filter must be an object; got `{other}`"
            ))),
        }
    }

    fn parse_object(&self, map: &Map<String, Value>) -> Result<Filter> {
        let mut operands = vec![];

        for (key, value) in map {
            match key.as_str() {
                "AND" => operands.push(self.parse_and(value)?),
                "OR" => operands.push(self.parse_or(value)?),
                "NOT" => operands.push(Filter::Not(Box::new(self.parse_and(value)?))),
                field => self.parse_field(field, value, &mut operands)?,
            }
        }

        Ok(match operands.len() {
            1 => operands.remove(0),
            _ => Filter::And(operands),
        })
    }

    /// `AND` and `NOT` accept a single object or an array of objects.
    fn parse_and(&self, value: &Value) -> Result<Filter> {
        match value {
            Value::Array(items) => {
                let operands = items
                    .iter()
                    .map(|item| self.parse(item))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Filter::And(operands))
            }
            Value::Object(_) => self.parse(value),
            other => Err(Error::invalid_statement(format!(
                "`AND`/`NOT` expects an object or an array of objects; got `{other}`"
            ))),
        }
    }

    fn parse_or(&self, value: &Value) -> Result<Filter> {
        let Value::Array(items) = value else {
            return Err(Error::invalid_statement(format!(
                "`OR` expects an array of objects; got `{value}`"
            )));
        };

        let operands = items
            .iter()
            .map(|item| self.parse(item))
            .collect::<Result<Vec<_>>>()?;

        Ok(Filter::Or(operands))
    }

    fn parse_field(&self, field: &str, value: &Value, dst: &mut Vec<Filter>) -> Result<()> {
        if !self.fields.contains(field) {
            return Err(Error::schema_mismatch(self.table, field));
        }

        match value {
            Value::Null => dst.push(Filter::field(field, Op::IsNull(true))),
            Value::Object(ops) => {
                for (name, operand) in ops {
                    dst.push(Filter::field(field, self.parse_op(field, name, operand)?));
                }
            }
            Value::Array(_) => {
                return Err(Error::invalid_statement(format!(
                    "field `{field}` cannot be compared to an array; use `in`"
                )))
            }
            scalar => dst.push(Filter::field(field, Op::Equals(scalar.clone()))),
        }

        Ok(())
    }

    fn parse_op(&self, field: &str, name: &str, operand: &Value) -> Result<Op> {
        Ok(match name {
            "equals" if operand.is_null() => Op::IsNull(true),
            "equals" => Op::Equals(scalar(field, name, operand)?),
            "not" if operand.is_null() => Op::IsNull(false),
            "not" => Op::Not(scalar(field, name, operand)?),
            "gt" => Op::Gt(scalar(field, name, operand)?),
            "gte" => Op::Gte(scalar(field, name, operand)?),
            "lt" => Op::Lt(scalar(field, name, operand)?),
            "lte" => Op::Lte(scalar(field, name, operand)?),
            "contains" => Op::Contains(pattern(field, name, operand)?),
            "startsWith" => Op::StartsWith(pattern(field, name, operand)?),
            "endsWith" => Op::EndsWith(pattern(field, name, operand)?),
            "in" => Op::In(list(field, name, operand)?),
            "notIn" => Op::NotIn(list(field, name, operand)?),
            "isNull" => match operand {
                Value::Bool(is_null) => Op::IsNull(*is_null),
                other => {
                    return Err(Error::invalid_statement(format!(
                        "`isNull` on field `{field}` expects a boolean; got `{other}`"
                    )))
                }
            },
            _ => return Err(Error::unknown_operator(field, name)),
        })
    }
}

fn scalar(field: &str, op: &str, value: &Value) -> Result<Value> {
    match value {
        Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(value.clone()),
        other => Err(Error::invalid_statement(format!(
            "`{op}` on field `{field}` expects a scalar; got `{other}`"
        ))),
    }
}

fn pattern(field: &str, op: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(Error::invalid_statement(format!(
            "`{op}` on field `{field}` expects a string; got `{other}`"
        ))),
    }
}

fn list(field: &str, op: &str, value: &Value) -> Result<Vec<Value>> {
    let Value::Array(items) = value else {
        return Err(Error::invalid_statement(format!(
            "`{op}` on field `{field}` expects an array; got `{value}`"
        )));
    };

    items.iter().map(|item| scalar(field, op, item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields() -> FieldSet {
        FieldSet::new(["id", "name", "age", "status"])
    }

    fn parse(input: Value) -> Result<Filter> {
        Filter::parse(&input, &fields(), "users")
    }

    #[test]
    fn null_and_empty_are_empty() {
        assert!(parse(Value::Null).unwrap().is_empty());
        assert!(parse(json!({})).unwrap().is_empty());
    }

    #[test]
    fn single_key_is_not_wrapped() {
        assert_eq!(
            parse(json!({ "name": "jo" })).unwrap(),
            Filter::eq("name", "jo")
        );
    }

    #[test]
    fn null_leaf_is_is_null() {
        assert_eq!(
            parse(json!({ "name": null })).unwrap(),
            Filter::field("name", Op::IsNull(true))
        );
        assert_eq!(
            parse(json!({ "name": { "not": null } })).unwrap(),
            Filter::field("name", Op::IsNull(false))
        );
    }

    #[test]
    fn several_operators_on_one_field() {
        assert_eq!(
            parse(json!({ "age": { "gte": 18, "lt": 65 } })).unwrap(),
            Filter::And(vec![
                Filter::field("age", Op::Gte(json!(18))),
                Filter::field("age", Op::Lt(json!(65))),
            ])
        );
    }

    #[test]
    fn logical_keys() {
        let filter = parse(json!({
            "OR": [{ "name": "a" }, { "name": "b" }],
            "NOT": { "status": "banned" },
        }))
        .unwrap();

        assert_eq!(
            filter,
            Filter::And(vec![
                Filter::Or(vec![Filter::eq("name", "a"), Filter::eq("name", "b")]),
                Filter::Not(Box::new(Filter::eq("status", "banned"))),
            ])
        );
    }

    #[test]
    fn unknown_field_is_schema_mismatch() {
        let err = parse(json!({ "OR": [{ "nmae": "a" }] })).unwrap_err();
        assert!(err.is_schema_mismatch());
        assert!(err.to_string().contains("nmae"));
        assert!(err.to_string().contains("users"));
    }

    #[test]
    fn unknown_operator() {
        let err = parse(json!({ "age": { "between": [1, 2] } })).unwrap_err();
        assert!(err.is_unknown_operator());
    }

    #[test]
    fn malformed_shapes() {
        assert!(parse(json!({ "OR": { "name": "a" } }))
            .unwrap_err()
            .is_invalid_statement());
        assert!(parse(json!({ "age": { "in": 3 } }))
            .unwrap_err()
            .is_invalid_statement());
        assert!(parse(json!({ "age": { "gt": null } }))
            .unwrap_err()
            .is_invalid_statement());
        assert!(parse(json!([1, 2])).unwrap_err().is_invalid_statement());

        let err = parse(json!({ "age": [1, 2] })).unwrap_err();
        assert!(err.is_invalid_statement());
        assert!(err.to_string().contains("use `in`"));
    }

    #[test]
    fn equality_lookup() {
        let filter = parse(json!({ "id": 7, "status": { "not": "x" } })).unwrap();
        assert_eq!(filter.equality_on("id"), Some(&json!(7)));
        assert_eq!(filter.equality_on("status"), None);
    }
}
