use super::{literal::Literal, Formatter, Ident, ToSql};

use quarry_core::schema::{Column, ColumnType};

/// A column definition inside `CREATE TABLE` or `ADD COLUMN`.
pub(super) struct ColumnDef<'a> {
    pub(super) column: &'a Column,

    /// True when the column is the table's only key column, in which case
    /// the key constraint is written inline.
    pub(super) inline_key: bool,

    /// True inside `ALTER TABLE ... ADD COLUMN`
    pub(super) added: bool,
}

impl ToSql for ColumnDef<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = self.column;
        let name = Ident(&column.name);

        fmt!(f, name, " ", column.ty.sql_name());

        if self.added {
            // SQLite rejects `NOT NULL` without a default on existing rows
            if let Some(default) = &column.default {
                if !column.nullable {
                    fmt!(f, " NOT NULL");
                }
                fmt!(f, " DEFAULT ", Literal(default));
            }
            return;
        }

        if self.inline_key {
            fmt!(f, " PRIMARY KEY");
            if column.auto_increment && column.ty == ColumnType::Integer {
                fmt!(f, " AUTOINCREMENT");
            }
        } else if !column.nullable {
            fmt!(f, " NOT NULL");
        }

        if column.unique && !column.primary_key {
            fmt!(f, " UNIQUE");
        }

        if let Some(default) = &column.default {
            fmt!(f, " DEFAULT ", Literal(default));
        }
    }
}
