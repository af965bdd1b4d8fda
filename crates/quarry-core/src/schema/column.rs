use crate::Value;

/// A declared column.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The name of the column in the database.
    pub name: String,

    /// The storage type of the column.
    pub ty: ColumnType,

    /// Whether or not the column accepts `NULL`
    pub nullable: bool,

    /// True if the column is part of the table's primary key
    pub primary_key: bool,

    /// True if the column carries a `UNIQUE` constraint
    pub unique: bool,

    /// True if the column is an integer primary key assigned by the store
    pub auto_increment: bool,

    /// Literal default applied by the store when the column is omitted
    pub default: Option<Value>,
}

/// Storage types understood by the store's SQLite engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
    Blob,
    Boolean,
    Numeric,
    DateTime,
    Json,
}

impl Column {
    /// A nullable, non-key column.
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            nullable: true,
            primary_key: false,
            unique: false,
            auto_increment: false,
            default: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

impl ColumnType {
    /// The type name emitted in DDL.
    pub fn sql_name(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
            ColumnType::Blob => "BLOB",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Numeric => "NUMERIC",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Json => "JSON",
        }
    }
}
