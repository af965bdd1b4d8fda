use super::{column_def::ColumnDef, Comma, Formatter, Ident, ToSql};

use crate::{
    stmt::{self, Statement},
    Direction, Filter, OrderBy, Pagination, Projection,
};

impl ToSql for &Statement {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match self {
            Statement::AddColumn(stmt) => stmt.to_sql(f),
            Statement::Count(stmt) => stmt.to_sql(f),
            Statement::CreateTable(stmt) => stmt.to_sql(f),
            Statement::Delete(stmt) => stmt.to_sql(f),
            Statement::Insert(stmt) => stmt.to_sql(f),
            Statement::Select(stmt) => stmt.to_sql(f),
            Statement::TableInfo(stmt) => stmt.to_sql(f),
            Statement::Update(stmt) => stmt.to_sql(f),
        }
    }
}

impl ToSql for &stmt::AddColumn {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let column = ColumnDef {
            column: &self.column,
            inline_key: false,
            added: true,
        };

        fmt!(f, "ALTER TABLE ", Ident(&self.table), " ADD COLUMN ", column);
    }
}

impl ToSql for &stmt::Count {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(
            f,
            "SELECT COUNT(*) AS \"count\" FROM ",
            Ident(&self.table),
            Where(&self.filter)
        );
    }
}

impl ToSql for &stmt::CreateTable {
    fn to_sql(self, f: &mut Formatter<'_>) {
        let key: Vec<_> = self.primary_key().collect();
        let inline_key = key.len() == 1;

        let columns = Comma(self.columns.iter().map(|column| ColumnDef {
            column,
            inline_key: inline_key && column.primary_key,
            added: false,
        }));

        fmt!(
            f,
            "CREATE TABLE IF NOT EXISTS ",
            Ident(&self.table),
            " (",
            columns
        );

        if key.len() > 1 {
            let key = Comma(key.iter().map(|column| Ident(&column.name)));
            fmt!(f, ", PRIMARY KEY (", key, ")");
        }

        fmt!(f, ")");
    }
}

impl ToSql for &stmt::Delete {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "DELETE FROM ", Ident(&self.table), Where(&self.filter));
    }
}

impl ToSql for &stmt::Insert {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "INSERT INTO ", Ident(&self.table));

        if self.values.is_empty() {
            fmt!(f, " DEFAULT VALUES");
            return;
        }

        let columns = Comma(self.values.keys().map(Ident));
        fmt!(f, " (", columns, ") VALUES (");

        for (i, value) in self.values.values().enumerate() {
            if i > 0 {
                f.dst.push_str(", ");
            }
            let placeholder = f.bind(value);
            fmt!(f, placeholder);
        }

        fmt!(f, ")");
    }
}

impl ToSql for &stmt::Select {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(
            f,
            "SELECT ",
            &self.projection,
            " FROM ",
            Ident(&self.table),
            Where(&self.filter),
            &self.order_by,
            self.pagination
        );
    }
}

impl ToSql for &stmt::TableInfo {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, "PRAGMA table_info(", Ident(&self.table), ")");
    }
}

impl ToSql for &stmt::Update {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(
            f,
            "UPDATE ",
            Ident(&self.table),
            " SET ",
            &self.assignments,
            Where(&self.filter)
        );
    }
}

/// ` WHERE <filter>`, or nothing for an empty filter.
struct Where<'a>(&'a Filter);

impl ToSql for Where<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if !self.0.is_empty() {
            fmt!(f, " WHERE ", self.0);
        }
    }
}

impl ToSql for &Projection {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.is_all() {
            fmt!(f, "*");
        } else {
            fmt!(f, Comma(self.columns.iter().map(Ident)));
        }
    }
}

impl ToSql for &OrderBy {
    fn to_sql(self, f: &mut Formatter<'_>) {
        if self.is_empty() {
            return;
        }

        let terms = Comma(self.terms.iter().map(|(field, direction)| Term(field, *direction)));
        fmt!(f, " ORDER BY ", terms);
    }
}

struct Term<'a>(&'a String, Direction);

impl ToSql for Term<'_> {
    fn to_sql(self, f: &mut Formatter<'_>) {
        fmt!(f, Ident(self.0), " ", self.1.as_sql());
    }
}

impl ToSql for Pagination {
    fn to_sql(self, f: &mut Formatter<'_>) {
        match (self.limit, self.offset) {
            (None, None) => {}
            (Some(limit), None) => fmt!(f, " LIMIT ", limit),
            (Some(limit), Some(offset)) => fmt!(f, " LIMIT ", limit, " OFFSET ", offset),
            // SQLite only accepts `OFFSET` after a `LIMIT`
            (None, Some(offset)) => fmt!(f, " LIMIT -1 OFFSET ", offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        stmt::{Count, Delete, Insert, Select, Statement, Update},
        Assignments, Direction, Filter, OrderBy, Pagination, Projection, Serializer,
    };
    use pretty_assertions::assert_eq;
    use quarry_core::schema::{Column, ColumnType, TableDef};
    use quarry_core::FieldSet;
    use serde_json::json;

    fn sql(stmt: impl Into<Statement>) -> String {
        let compiled = Serializer::new().serialize(&stmt.into());
        let mut sql = compiled.sql;
        for name in compiled.params.names() {
            sql = sql.replace(&format!(":{name}"), ":?");
        }
        sql
    }

    #[test]
    fn select_all() {
        assert_eq!(sql(Select::new("users")), "SELECT * FROM \"users\"");
    }

    #[test]
    fn select_everything() {
        let select = Select::new("users")
            .projection(Projection {
                columns: vec!["id".into(), "name".into()],
            })
            .filter(Filter::eq("status", "active"))
            .order_by(OrderBy {
                terms: vec![("age".into(), Direction::Desc), ("id".into(), Direction::Asc)],
            })
            .pagination(Pagination {
                limit: Some(10),
                offset: Some(20),
            });

        assert_eq!(
            sql(select),
            "SELECT \"id\", \"name\" FROM \"users\" WHERE \"status\" = :? \
             ORDER BY \"age\" DESC, \"id\" ASC LIMIT 10 OFFSET 20"
        );
    }

    #[test]
    fn offset_without_limit() {
        let select = Select::new("t").pagination(Pagination {
            limit: None,
            offset: Some(5),
        });
        assert_eq!(sql(select), "SELECT * FROM \"t\" LIMIT -1 OFFSET 5");
    }

    #[test]
    fn count_and_delete() {
        assert_eq!(
            sql(Count::new("users", Filter::empty())),
            "SELECT COUNT(*) AS \"count\" FROM \"users\""
        );
        assert_eq!(
            sql(Delete::new("users", Filter::eq("id", 1))),
            "DELETE FROM \"users\" WHERE \"id\" = :?"
        );
    }

    #[test]
    fn insert() {
        let fields = FieldSet::new(["name", "meta"]);
        let insert = Insert::parse(
            &json!({ "name": "a", "meta": { "k": 1 } }),
            &fields,
            "users",
        )
        .unwrap();

        let compiled = Serializer::new().serialize(&insert.into());
        assert!(compiled
            .sql
            .starts_with("INSERT INTO \"users\" (\"name\", \"meta\") VALUES (:"));
        assert_eq!(
            compiled.params.values().collect::<Vec<_>>(),
            [&json!("a"), &json!("{\"k\":1}")]
        );

        let empty = Insert::parse(&json!({}), &fields, "users").unwrap();
        assert_eq!(sql(empty), "INSERT INTO \"users\" DEFAULT VALUES");
    }

    #[test]
    fn update_shares_one_namespace() {
        let fields = FieldSet::new(["id", "balance"]);
        let assignments =
            Assignments::parse(&json!({ "balance": { "increment": 5 } }), &fields, "acct")
                .unwrap();
        let update = Update::new("acct", assignments, Filter::eq("id", 1));

        let compiled = Serializer::new().serialize(&update.into());
        assert_eq!(compiled.params.len(), 2);

        let mut sql = compiled.sql.clone();
        for name in compiled.params.names() {
            sql = sql.replace(&format!(":{name}"), ":?");
        }
        assert_eq!(
            sql,
            "UPDATE \"acct\" SET \"balance\" = \"balance\" + :? WHERE \"id\" = :?"
        );
    }

    #[test]
    fn create_table_single_key() {
        let table = TableDef::new("users")
            .column(
                Column::new("id", ColumnType::Integer)
                    .primary_key()
                    .auto_increment(),
            )
            .column(Column::new("email", ColumnType::Text).not_null().unique())
            .column(Column::new("active", ColumnType::Boolean).default_value(true))
            .column(Column::new("nick", ColumnType::Text).default_value("o'neil"));

        assert_eq!(
            sql(Statement::create_table(&table)),
            "CREATE TABLE IF NOT EXISTS \"users\" (\
             \"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
             \"email\" TEXT NOT NULL UNIQUE, \
             \"active\" BOOLEAN DEFAULT 1, \
             \"nick\" TEXT DEFAULT 'o''neil')"
        );
    }

    #[test]
    fn create_table_composite_key() {
        let table = TableDef::new("memberships")
            .column(Column::new("user_id", ColumnType::Integer).primary_key())
            .column(Column::new("group_id", ColumnType::Integer).primary_key())
            .column(Column::new("role", ColumnType::Text));

        assert_eq!(
            sql(Statement::create_table(&table)),
            "CREATE TABLE IF NOT EXISTS \"memberships\" (\
             \"user_id\" INTEGER NOT NULL, \
             \"group_id\" INTEGER NOT NULL, \
             \"role\" TEXT, \
             PRIMARY KEY (\"user_id\", \"group_id\"))"
        );
    }

    #[test]
    fn add_column() {
        let with_default = Column::new("score", ColumnType::Real)
            .not_null()
            .default_value(0);
        assert_eq!(
            sql(Statement::add_column("users", &with_default)),
            "ALTER TABLE \"users\" ADD COLUMN \"score\" REAL NOT NULL DEFAULT 0"
        );

        let no_default = Column::new("bio", ColumnType::Text).not_null().unique();
        assert_eq!(
            sql(Statement::add_column("users", &no_default)),
            "ALTER TABLE \"users\" ADD COLUMN \"bio\" TEXT"
        );
    }

    #[test]
    fn table_info() {
        assert_eq!(
            sql(Statement::table_info("we\"ird")),
            "PRAGMA table_info(\"we\"\"ird\")"
        );
    }
}
