mod add_column;
pub use add_column::AddColumn;

mod count;
pub use count::Count;

mod create_table;
pub use create_table::CreateTable;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::Select;

mod table_info;
pub use table_info::TableInfo;

mod update;
pub use update::Update;

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    AddColumn(AddColumn),
    Count(Count),
    CreateTable(CreateTable),
    Delete(Delete),
    Insert(Insert),
    Select(Select),
    TableInfo(TableInfo),
    Update(Update),
}

impl Statement {
    /// True for statements that only read and go through the query API.
    pub fn is_query(&self) -> bool {
        matches!(
            self,
            Statement::Count(_) | Statement::Select(_) | Statement::TableInfo(_)
        )
    }

    /// Name of the table the statement targets.
    pub fn table(&self) -> &str {
        match self {
            Statement::AddColumn(stmt) => &stmt.table,
            Statement::Count(stmt) => &stmt.table,
            Statement::CreateTable(stmt) => &stmt.table,
            Statement::Delete(stmt) => &stmt.table,
            Statement::Insert(stmt) => &stmt.table,
            Statement::Select(stmt) => &stmt.table,
            Statement::TableInfo(stmt) => &stmt.table,
            Statement::Update(stmt) => &stmt.table,
        }
    }
}
