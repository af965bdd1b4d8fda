use super::{Formatter, Ident, ToSql};

use crate::{math, Assignment, AssignmentOp, Assignments, MathExpr};

impl ToSql for &Assignments {
    fn to_sql(self, f: &mut Formatter<'_>) {
        for (i, assignment) in self.items.iter().enumerate() {
            if i > 0 {
                f.dst.push_str(", ");
            }
            fmt!(f, assignment);
        }
    }
}

impl ToSql for &Assignment {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = Ident(&self.column);

        match &self.op {
            AssignmentOp::Set(value) => {
                let placeholder = f.bind(value);
                fmt!(f, column, " = ", placeholder);
            }
            AssignmentOp::Increment(delta) => {
                let placeholder = f.bind(delta);
                fmt!(f, column, " = ", Ident(&self.column), " + ", placeholder);
            }
            AssignmentOp::Decrement(delta) => {
                let placeholder = f.bind(delta);
                fmt!(f, column, " = ", Ident(&self.column), " - ", placeholder);
            }
            AssignmentOp::Math(expr) => fmt!(f, column, " = ", expr),
        }
    }
}

impl ToSql for &MathExpr {
    fn to_sql(self, f: &mut Formatter<'_>) {
        // Each distinct argument is bound once, however often it is referenced
        let mut bound = indexmap::IndexMap::new();

        for token in math::tokens(&self.expr) {
            match token {
                // `Assignments::parse` rejects names missing from `args`
                math::Token::Placeholder(name) => match self.args.get(name) {
                    Some(value) => {
                        let placeholder = bound
                            .entry(name)
                            .or_insert_with(|| f.bind(value))
                            .clone();
                        fmt!(f, placeholder);
                    }
                    None => {
                        f.dst.push(':');
                        f.dst.push_str(name);
                    }
                },
                math::Token::Literal(text) => f.dst.push_str(text),
            }
        }
    }
}
