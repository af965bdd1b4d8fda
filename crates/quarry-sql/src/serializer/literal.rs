use super::{Formatter, ToSql};

use quarry_core::Value;

/// A value rendered inline as an SQL literal. Only used in DDL, where
/// parameters are not accepted.
pub(super) struct Literal<'a>(pub(super) &'a Value);

impl ToSql for Literal<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self.0 {
            Value::Null => f.dst.push_str("NULL"),
            Value::Bool(true) => f.dst.push('1'),
            Value::Bool(false) => f.dst.push('0'),
            Value::Number(n) => f.dst.push_str(&n.to_string()),
            Value::String(s) => quoted(f, s),
            value => quoted(f, &value.to_string()),
        }
    }
}

fn quoted(f: &mut Formatter<'_>, s: &str) {
    f.dst.push('\'');
    for c in s.chars() {
        if c == '\'' {
            f.dst.push('\'');
        }
        f.dst.push(c);
    }
    f.dst.push('\'');
}
