use crate::{Client, Table};

use indexmap::IndexMap;
use quarry_core::{
    driver::{Auth, Endpoint, Response, Statement},
    Result, Value,
};

/// Writes queued across tables and sent together.
///
/// Statements are grouped by destination (endpoints, port and credentials);
/// each group is executed as one transaction, in the order groups were first
/// used. Statements are compiled when queued, so invalid input is reported by
/// the queueing call.
#[derive(Debug)]
pub struct Batch {
    client: Client,
    groups: IndexMap<Destination, Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Destination {
    endpoints: Vec<Endpoint>,
    port: u16,
    auth: Option<Auth>,
}

impl Batch {
    pub(crate) fn new(client: Client) -> Self {
        Self {
            client,
            groups: IndexMap::new(),
        }
    }

    pub fn create(&mut self, table: &Table, data: Value) -> Result<&mut Self> {
        let stmt = table.insert_statement(&data)?;
        Ok(self.push(table, stmt))
    }

    pub fn update_many(&mut self, table: &Table, args: Value) -> Result<&mut Self> {
        let stmt = table.update_statement(&args)?;
        Ok(self.push(table, stmt))
    }

    pub fn delete(&mut self, table: &Table, args: Value) -> Result<&mut Self> {
        let stmt = table.delete_statement(&args)?;
        Ok(self.push(table, stmt))
    }

    /// Number of queued statements.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Sends every group and returns one response per group.
    ///
    /// The queue is emptied before anything is sent, so a failed batch is not
    /// retried by a second call.
    pub async fn execute(&mut self) -> Result<Vec<Response>> {
        let groups = std::mem::take(&mut self.groups);
        let mut responses = Vec::with_capacity(groups.len());

        for (destination, statements) in groups {
            let response = self
                .client
                .dispatcher()
                .transaction(
                    &destination.endpoints,
                    destination.port,
                    statements,
                    destination.auth.as_ref(),
                )
                .await?;

            responses.push(response);
        }

        Ok(responses)
    }

    fn push(&mut self, table: &Table, stmt: Statement) -> &mut Self {
        let def = table.def();
        let destination = Destination {
            endpoints: def.endpoints.clone(),
            port: def.port,
            auth: def.auth.clone(),
        };

        self.groups.entry(destination).or_default().push(stmt);
        self
    }
}
