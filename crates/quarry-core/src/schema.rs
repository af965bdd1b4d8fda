mod column;
pub use column::{Column, ColumnType};

mod column_info;
pub use column_info::ColumnInfo;

mod field_set;
pub use field_set::FieldSet;

mod table;
pub use table::TableDef;

mod verify;
pub use verify::is_identifier;
