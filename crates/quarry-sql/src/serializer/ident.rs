use super::{Formatter, ToSql};

/// A quoted identifier. Embedded `"` are doubled.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let name = self.0.as_ref();

        f.dst.push('"');
        for c in name.chars() {
            if c == '"' {
                f.dst.push('"');
            }
            f.dst.push(c);
        }
        f.dst.push('"');
    }
}
