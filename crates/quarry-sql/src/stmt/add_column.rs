use super::Statement;

use quarry_core::schema::Column;

/// A statement to add a column to an existing table.
#[derive(Debug, Clone, PartialEq)]
pub struct AddColumn {
    /// Name of the table to add the column to.
    pub table: String,

    /// Column definition.
    pub column: Column,
}

impl Statement {
    /// Adds a column to a table.
    ///
    /// Key and uniqueness constraints cannot be added to existing rows, so
    /// only the type, the default and (with a default) `NOT NULL` are kept.
    pub fn add_column(table: impl Into<String>, column: &Column) -> Self {
        AddColumn {
            table: table.into(),
            column: column.clone(),
        }
        .into()
    }
}

impl From<AddColumn> for Statement {
    fn from(value: AddColumn) -> Self {
        Self::AddColumn(value)
    }
}
