use super::Statement;
use crate::{Assignments, Filter};

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    pub table: String,
    pub assignments: Assignments,
    pub filter: Filter,
}

impl Update {
    pub fn new(table: impl Into<String>, assignments: Assignments, filter: Filter) -> Self {
        Self {
            table: table.into(),
            assignments,
            filter,
        }
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Self::Update(value)
    }
}
