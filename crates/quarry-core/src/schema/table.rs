use super::{Column, FieldSet};
use crate::{
    driver::{Auth, Endpoint},
    Result,
};

/// Declared shape of one remote table and where to reach it.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDef {
    /// The name of the table in the database.
    pub name: String,

    /// Columns, in declaration order.
    pub columns: Vec<Column>,

    /// Database port the table lives behind.
    pub port: u16,

    /// Addresses through which `port` is reachable.
    pub endpoints: Vec<Endpoint>,

    /// Optional Basic credentials.
    pub auth: Option<Auth>,
}

impl TableDef {
    /// Default HTTP port of the store.
    pub const DEFAULT_PORT: u16 = 4001;

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            port: Self::DEFAULT_PORT,
            endpoints: vec![],
            auth: None,
        }
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    /// Parses and appends each address.
    pub fn endpoints<I, S>(mut self, endpoints: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for endpoint in endpoints {
            self.endpoints.push(Endpoint::parse(endpoint.as_ref())?);
        }
        Ok(self)
    }

    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn field_set(&self) -> FieldSet {
        self.columns.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.primary_key)
    }

    /// The key column when the primary key is exactly one column.
    pub fn single_primary_key(&self) -> Option<&Column> {
        let mut pk = self.primary_key();
        match (pk.next(), pk.next()) {
            (Some(column), None) => Some(column),
            _ => None,
        }
    }
}
