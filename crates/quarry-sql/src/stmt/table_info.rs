use super::Statement;

/// `PRAGMA table_info`, listing the live columns of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub table: String,
}

impl Statement {
    pub fn table_info(table: impl Into<String>) -> Self {
        TableInfo {
            table: table.into(),
        }
        .into()
    }
}

impl From<TableInfo> for Statement {
    fn from(value: TableInfo) -> Self {
        Self::TableInfo(value)
    }
}
