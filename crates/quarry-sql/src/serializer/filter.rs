use super::{Delimited, Formatter, Ident, ToSql};

use crate::{FieldCondition, Filter, Op};

use quarry_core::Value;

impl ToSql for &Filter {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Filter::And(operands) if operands.is_empty() => fmt!(f, "1 = 1"),
            Filter::And(operands) => {
                fmt!(f, Delimited(operands.iter().map(Conjunct), " AND "));
            }
            Filter::Or(operands) if operands.is_empty() => fmt!(f, "1 = 0"),
            Filter::Or(operands) => {
                f.dst.push('(');
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.dst.push_str(" OR ");
                    }
                    f.scoped(|f| fmt!(f, "(", operand, ")"));
                }
                f.dst.push(')');
            }
            Filter::Not(operand) => {
                let operand = &**operand;
                f.scoped(|f| fmt!(f, "NOT (", operand, ")"));
            }
            Filter::Field(cond) => fmt!(f, cond),
        }
    }
}

/// One operand of a conjunction. Nested conjunctions are parenthesized.
struct Conjunct<'a>(&'a Filter);

impl ToSql for Conjunct<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self.0 {
            Filter::And(operands) if operands.len() > 1 => fmt!(f, "(", self.0, ")"),
            filter => fmt!(f, filter),
        }
    }
}

impl ToSql for &FieldCondition {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = Ident(&self.field);

        match &self.op {
            Op::Equals(value) => binary(f, column, "=", value),
            Op::Not(value) => binary(f, column, "<>", value),
            Op::Gt(value) => binary(f, column, ">", value),
            Op::Gte(value) => binary(f, column, ">=", value),
            Op::Lt(value) => binary(f, column, "<", value),
            Op::Lte(value) => binary(f, column, "<=", value),
            Op::Contains(s) => like(f, column, format!("%{s}%")),
            Op::StartsWith(s) => like(f, column, format!("{s}%")),
            Op::EndsWith(s) => like(f, column, format!("%{s}")),
            Op::In(values) if values.is_empty() => fmt!(f, "1 = 0"),
            Op::NotIn(values) if values.is_empty() => fmt!(f, "1 = 1"),
            Op::In(values) => list(f, column, " IN (", values),
            Op::NotIn(values) => list(f, column, " NOT IN (", values),
            Op::IsNull(true) => fmt!(f, column, " IS NULL"),
            Op::IsNull(false) => fmt!(f, column, " IS NOT NULL"),
        }
    }
}

fn binary(f: &mut Formatter<'_>, column: Ident<&String>, op: &str, value: &Value) {
    let placeholder = f.bind(value);
    fmt!(f, column, " ", op, " ", placeholder);
}

fn like(f: &mut Formatter<'_>, column: Ident<&String>, pattern: String) {
    let placeholder = f.bind(&Value::String(pattern));
    fmt!(f, column, " LIKE ", placeholder);
}

fn list(f: &mut Formatter<'_>, column: Ident<&String>, op: &str, values: &[Value]) {
    fmt!(f, column, op);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.dst.push_str(", ");
        }
        let placeholder = f.bind(value);
        fmt!(f, placeholder);
    }
    f.dst.push(')');
}

#[cfg(test)]
mod tests {
    use crate::{Filter, Op, Serializer};
    use serde_json::json;

    fn sql(filter: &Filter) -> String {
        let (sql, params) = Serializer::new().filter(filter);
        let mut sql = sql;
        for name in params.names() {
            sql = sql.replace(&format!(":{name}"), ":?");
        }
        sql
    }

    #[test]
    fn empty_filter() {
        let (sql, params) = Serializer::new().filter(&Filter::empty());
        assert_eq!(sql, "1 = 1");
        assert!(params.is_empty());
    }

    #[test]
    fn comparison_operators() {
        for (op, expected) in [
            (Op::Equals(json!(1)), "\"a\" = :?"),
            (Op::Not(json!(1)), "\"a\" <> :?"),
            (Op::Gt(json!(1)), "\"a\" > :?"),
            (Op::Gte(json!(1)), "\"a\" >= :?"),
            (Op::Lt(json!(1)), "\"a\" < :?"),
            (Op::Lte(json!(1)), "\"a\" <= :?"),
            (Op::IsNull(true), "\"a\" IS NULL"),
            (Op::IsNull(false), "\"a\" IS NOT NULL"),
        ] {
            assert_eq!(sql(&Filter::field("a", op)), expected);
        }
    }

    #[test]
    fn like_wildcards_are_bound() {
        let (sql, params) = Serializer::new().filter(&Filter::field(
            "name",
            Op::StartsWith("jo".to_string()),
        ));
        assert!(sql.starts_with("\"name\" LIKE :"));
        assert!(!sql.contains('%'));
        assert_eq!(params.values().collect::<Vec<_>>(), [&json!("jo%")]);
    }

    #[test]
    fn in_lists() {
        assert_eq!(
            sql(&Filter::field("a", Op::In(vec![json!(1), json!(2)]))),
            "\"a\" IN (:?, :?)"
        );
        assert_eq!(
            sql(&Filter::field("a", Op::NotIn(vec![json!(1)]))),
            "\"a\" NOT IN (:?)"
        );
        assert_eq!(sql(&Filter::field("a", Op::In(vec![]))), "1 = 0");
        assert_eq!(sql(&Filter::field("a", Op::NotIn(vec![]))), "1 = 1");
    }

    #[test]
    fn nested_conjunction_is_parenthesized() {
        let filter = Filter::And(vec![
            Filter::eq("a", 1),
            Filter::And(vec![Filter::eq("b", 2), Filter::eq("c", 3)]),
        ]);
        assert_eq!(sql(&filter), "\"a\" = :? AND (\"b\" = :? AND \"c\" = :?)");
    }

    #[test]
    fn empty_disjunction_is_false() {
        assert_eq!(sql(&Filter::Or(vec![])), "1 = 0");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(sql(&Filter::eq("we\"ird", 1)), "\"we\"\"ird\" = :?");
    }
}
