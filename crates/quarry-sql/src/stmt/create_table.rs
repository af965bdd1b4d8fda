use super::Statement;

use quarry_core::schema::{Column, TableDef};

/// A statement to create a table if it does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTable {
    /// Name of the table.
    pub table: String,

    /// Column definitions.
    pub columns: Vec<Column>,
}

impl CreateTable {
    /// Columns that make up the primary key, in declaration order.
    pub fn primary_key(&self) -> impl Iterator<Item = &Column> + '_ {
        self.columns.iter().filter(|column| column.primary_key)
    }
}

impl Statement {
    /// Creates a table from its declared schema.
    pub fn create_table(table: &TableDef) -> Self {
        CreateTable {
            table: table.name.clone(),
            columns: table.columns.clone(),
        }
        .into()
    }
}

impl From<CreateTable> for Statement {
    fn from(value: CreateTable) -> Self {
        Self::CreateTable(value)
    }
}
