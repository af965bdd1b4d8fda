use crate::math;

use indexmap::IndexMap;
use quarry_core::{Error, FieldSet, Result, Value};

/// The `SET` list of an `UPDATE`, in caller order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Assignments {
    pub items: Vec<Assignment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub column: String,
    pub op: AssignmentOp,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssignmentOp {
    /// `col = value`
    Set(Value),

    /// `col = col + delta`
    Increment(Value),

    /// `col = col - delta`
    Decrement(Value),

    /// `col = <expr>` with named arguments
    Math(MathExpr),
}

/// A math expression that already passed the safety gate.
#[derive(Debug, Clone, PartialEq)]
pub struct MathExpr {
    pub expr: String,
    pub args: IndexMap<String, Value>,
}

impl Assignments {
    /// Parses a caller-supplied update object.
    ///
    /// A value that is an object with an `increment`, `decrement`, `math` or
    /// `set` key is an operation; every other value is a literal.
    pub fn parse(input: &Value, fields: &FieldSet, table: &str) -> Result<Assignments> {
        let Value::Object(map) = input else {
            return Err(Error::invalid_statement(format!(
                "update data must be an object; got `{input}`"
            )));
        };

        if map.is_empty() {
            return Err(Error::invalid_statement("update data has no columns"));
        }

        let mut items = Vec::with_capacity(map.len());

        for (column, value) in map {
            if !fields.contains(column) {
                return Err(Error::schema_mismatch(table, column));
            }

            items.push(Assignment {
                column: column.clone(),
                op: parse_op(column, value)?,
            });
        }

        Ok(Assignments { items })
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The literal value assigned to `column`, if any.
    pub fn literal(&self, column: &str) -> Option<&Value> {
        self.items.iter().find_map(|item| match &item.op {
            AssignmentOp::Set(value) if item.column == column => Some(value),
            _ => None,
        })
    }

    /// True when `column` is assigned by any operation.
    pub fn touches(&self, column: &str) -> bool {
        self.items.iter().any(|item| item.column == column)
    }
}

fn parse_op(column: &str, value: &Value) -> Result<AssignmentOp> {
    let Value::Object(map) = value else {
        return Ok(AssignmentOp::Set(value.clone()));
    };

    if let Some(delta) = map.get("increment") {
        return Ok(AssignmentOp::Increment(number(column, "increment", delta)?));
    }

    if let Some(delta) = map.get("decrement") {
        return Ok(AssignmentOp::Decrement(number(column, "decrement", delta)?));
    }

    if let Some(expr) = map.get("math") {
        let Value::String(expr) = expr else {
            return Err(Error::invalid_statement(format!(
                "`math` on column `{column}` expects a string"
            )));
        };

        // Nothing else is looked at until the expression is known to be safe
        math::check(column, expr)?;

        let args = match map.get("args") {
            None | Some(Value::Null) => IndexMap::new(),
            Some(Value::Object(args)) => args
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            Some(other) => {
                return Err(Error::invalid_statement(format!(
                    "`args` on column `{column}` expects an object; got `{other}`"
                )))
            }
        };

        let unbound = math::tokens(expr).into_iter().find_map(|token| match token {
            math::Token::Placeholder(name) if !args.contains_key(name) => Some(name),
            _ => None,
        });

        if let Some(name) = unbound {
            return Err(Error::invalid_statement(format!(
                "`math` on column `{column}` references `:{name}`, which is not in `args`"
            )));
        }

        return Ok(AssignmentOp::Math(MathExpr {
            expr: expr.clone(),
            args,
        }));
    }

    if let Some(value) = map.get("set") {
        return Ok(AssignmentOp::Set(value.clone()));
    }

    // A plain object is stored as a JSON document
    Ok(AssignmentOp::Set(value.clone()))
}

fn number(column: &str, op: &str, value: &Value) -> Result<Value> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        other => Err(Error::invalid_statement(format!(
            "`{op}` on column `{column}` expects a number; got `{other}`"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(input: Value) -> Result<Assignments> {
        Assignments::parse(&input, &FieldSet::new(["balance", "name", "meta"]), "accounts")
    }

    #[test]
    fn literal_and_operations() {
        let assignments = parse(json!({
            "name": "x",
            "balance": { "increment": 5 },
            "meta": { "tags": ["a"] },
        }))
        .unwrap();

        assert_eq!(assignments.items.len(), 3);
        assert_eq!(assignments.literal("name"), Some(&json!("x")));
        assert_eq!(
            assignments.items[1].op,
            AssignmentOp::Increment(json!(5))
        );
        assert_eq!(
            assignments.items[2].op,
            AssignmentOp::Set(json!({ "tags": ["a"] }))
        );
    }

    #[test]
    fn unknown_column() {
        assert!(parse(json!({ "balanse": 1 })).unwrap_err().is_schema_mismatch());
    }

    #[test]
    fn empty_update() {
        assert!(parse(json!({})).unwrap_err().is_invalid_statement());
    }

    #[test]
    fn increment_needs_number() {
        assert!(parse(json!({ "balance": { "increment": "5" } }))
            .unwrap_err()
            .is_invalid_statement());
    }

    #[test]
    fn math_placeholders_must_be_bound() {
        let err = parse(json!({
            "balance": { "math": "\"balance\" * :rate + :fee", "args": { "rate": 2 } },
        }))
        .unwrap_err();

        assert!(err.is_invalid_statement());
        assert!(err.to_string().contains(":fee"));

        assert!(parse(json!({ "balance": { "math": "\"balance\" + :x" } }))
            .unwrap_err()
            .is_invalid_statement());
    }

    #[test]
    fn unsafe_math_is_rejected_at_parse() {
        let err = parse(json!({ "balance": { "math": "1; DROP TABLE users" } })).unwrap_err();
        assert!(err.is_unsafe_expression());
    }
}
