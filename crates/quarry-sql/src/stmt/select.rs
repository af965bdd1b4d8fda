use super::Statement;
use crate::{Filter, OrderBy, Pagination, Projection};

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub table: String,
    pub projection: Projection,
    pub filter: Filter,
    pub order_by: OrderBy,
    pub pagination: Pagination,
}

impl Select {
    /// Selects every column of every row.
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            projection: Projection::default(),
            filter: Filter::empty(),
            order_by: OrderBy::default(),
            pagination: Pagination::default(),
        }
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = order_by;
        self
    }

    pub fn pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Self::Select(value)
    }
}
