use super::Statement;
use crate::Filter;

/// `SELECT COUNT(*)` over the rows matching a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Count {
    pub table: String,
    pub filter: Filter,
}

impl Count {
    pub fn new(table: impl Into<String>, filter: Filter) -> Self {
        Self {
            table: table.into(),
            filter,
        }
    }
}

impl From<Count> for Statement {
    fn from(value: Count) -> Self {
        Self::Count(value)
    }
}
