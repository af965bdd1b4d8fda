use crate::{
    args::{FindArgs, Parser},
    cache::TableKey,
    row, Client, Row,
};

use quarry_core::{
    driver::{self, Consistency, QueryResult, Response},
    Error, FieldSet, Result, TableDef, Value,
};
use quarry_sql::{
    stmt::{Count, Delete, Insert, Select, Statement, Update},
    Assignments, Filter, Pagination, Projection, Serializer,
};
use std::sync::Arc;

/// A declared table bound to a [`Client`].
#[derive(Debug, Clone)]
pub struct Table {
    client: Client,
    def: Arc<TableDef>,
    fields: FieldSet,
}

impl Table {
    pub(crate) fn new(client: Client, def: TableDef) -> Self {
        let fields = def.field_set();
        Self {
            client,
            def: Arc::new(def),
            fields,
        }
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn def(&self) -> &TableDef {
        &self.def
    }

    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Key of this table in the client's schema cache.
    pub fn key(&self) -> TableKey {
        TableKey::new(self.def.name.clone(), self.def.port)
    }

    /// Inserts one row and returns it as stored.
    pub async fn create(&self, data: Value) -> Result<Row> {
        let response = self.execute(vec![self.insert_statement(&data)?]).await?;

        let id = response
            .results
            .first()
            .and_then(|result| result.last_insert_id)
            .ok_or_else(|| Error::invalid_result("insert did not report a row id"))?;

        let select = Select::new(self.name())
            .filter(Filter::eq("rowid", id))
            .pagination(Pagination::limit(1));

        self.rows(select.into(), Consistency::Strong)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_result(format!("inserted row {id} not found")))
    }

    /// Inserts every item in one transaction and returns the number of rows
    /// written.
    pub async fn create_many(&self, items: Vec<Value>) -> Result<u64> {
        if items.is_empty() {
            return Ok(0);
        }

        let statements = items
            .iter()
            .map(|data| self.insert_statement(data))
            .collect::<Result<Vec<_>>>()?;

        let response = self.transaction(statements).await?;
        Ok(response.rows_affected())
    }

    pub async fn find_many(&self, args: Value) -> Result<Vec<Row>> {
        let args = self.parser().find(&args)?;
        self.find(args).await
    }

    pub async fn find_first(&self, args: Value) -> Result<Option<Row>> {
        let mut args = self.parser().find(&args)?;
        args.pagination.limit = Some(1);
        Ok(self.find(args).await?.into_iter().next())
    }

    /// Like [`Table::find_first`], but `where` must pin down at most one row:
    /// every primary key column, or one unique column, must be matched by
    /// plain equality.
    pub async fn find_unique(&self, args: Value) -> Result<Option<Row>> {
        let mut args = self.parser().find(&args)?;

        if !self.is_unique_filter(&args.filter) {
            return Err(Error::invalid_statement(format!(
                "`find_unique` on `{}` requires equality on the primary key or a unique column",
                self.name()
            )));
        }

        args.pagination.limit = Some(1);
        Ok(self.find(args).await?.into_iter().next())
    }

    /// Updates the matching rows and returns one of them as stored.
    ///
    /// Returns `None` when no row matched. When the table has a single-column
    /// key whose value is known, the updated row is read back by key.
    /// Otherwise the `rowid` of the first row matching `where` is read before
    /// the write and the row is read back by it, so an update that moves the
    /// row out of `where` still returns it. When several rows match, only
    /// that first one is returned.
    pub async fn update(&self, args: Value) -> Result<Option<Row>> {
        let parser = self.parser();
        let args = parser.update(&args)?;
        let assignments = Assignments::parse(args.data, &self.fields, self.name())?;

        let reread = match self.reread_filter(&assignments, &args.filter) {
            Some(filter) => Some(filter),
            None => self
                .first_rowid(&args.filter)
                .await?
                .map(|rowid| Filter::eq("rowid", rowid)),
        };

        let update = Update::new(self.name(), assignments, args.filter.clone());

        let response = self.execute(vec![self.compile(update.into())]).await?;

        if response.rows_affected() == 0 {
            return Ok(None);
        }

        let select = Select::new(self.name())
            .filter(reread.unwrap_or(args.filter))
            .pagination(Pagination::limit(1));

        Ok(self
            .rows(select.into(), Consistency::Strong)
            .await?
            .into_iter()
            .next())
    }

    /// Updates every matching row and returns how many changed.
    pub async fn update_many(&self, args: Value) -> Result<u64> {
        let response = self.execute(vec![self.update_statement(&args)?]).await?;
        Ok(response.rows_affected())
    }

    /// Deletes every matching row and returns how many were removed.
    pub async fn delete(&self, args: Value) -> Result<u64> {
        let response = self.execute(vec![self.delete_statement(&args)?]).await?;
        Ok(response.rows_affected())
    }

    pub async fn count(&self, args: Value) -> Result<u64> {
        let (filter, consistency) = self.parser().count(&args)?;
        let consistency = consistency.unwrap_or_else(|| self.default_consistency());

        let result = self
            .query(Count::new(self.name(), filter).into(), consistency)
            .await?;

        let count = result
            .values
            .first()
            .and_then(|row| row.first())
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::invalid_result("count returned no number"))?;

        Ok(count)
    }

    pub(crate) fn insert_statement(&self, data: &Value) -> Result<driver::Statement> {
        let insert = Insert::parse(data, &self.fields, self.name())?;
        Ok(self.compile(insert.into()))
    }

    pub(crate) fn update_statement(&self, args: &Value) -> Result<driver::Statement> {
        let args = self.parser().update(args)?;
        let assignments = Assignments::parse(args.data, &self.fields, self.name())?;
        let update = Update::new(self.name(), assignments, args.filter);
        Ok(self.compile(update.into()))
    }

    pub(crate) fn delete_statement(&self, args: &Value) -> Result<driver::Statement> {
        let filter = self.parser().delete(args)?;
        Ok(self.compile(Delete::new(self.name(), filter).into()))
    }

    async fn find(&self, args: FindArgs) -> Result<Vec<Row>> {
        let consistency = args
            .consistency
            .unwrap_or_else(|| self.default_consistency());

        let select = Select::new(self.name())
            .projection(args.projection)
            .filter(args.filter)
            .order_by(args.order_by)
            .pagination(args.pagination);

        self.rows(select.into(), consistency).await
    }

    async fn rows(&self, stmt: Statement, consistency: Consistency) -> Result<Vec<Row>> {
        row::rows(self.query(stmt, consistency).await?)
    }

    pub(crate) async fn query(
        &self,
        stmt: Statement,
        consistency: Consistency,
    ) -> Result<QueryResult> {
        let response = self
            .client
            .dispatcher()
            .query(
                &self.def.endpoints,
                self.def.port,
                self.compile(stmt),
                consistency,
                self.def.auth.as_ref(),
            )
            .await?;

        response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| Error::invalid_result("query returned no result"))
    }

    pub(crate) async fn execute(&self, statements: Vec<driver::Statement>) -> Result<Response> {
        self.client
            .dispatcher()
            .execute(
                &self.def.endpoints,
                self.def.port,
                statements,
                self.def.auth.as_ref(),
            )
            .await
    }

    pub(crate) async fn transaction(
        &self,
        statements: Vec<driver::Statement>,
    ) -> Result<Response> {
        self.client
            .dispatcher()
            .transaction(
                &self.def.endpoints,
                self.def.port,
                statements,
                self.def.auth.as_ref(),
            )
            .await
    }

    pub(crate) fn compile(&self, stmt: Statement) -> driver::Statement {
        Serializer::new().serialize(&stmt).into()
    }

    /// `rowid` of the first row matching `filter`, read at strong consistency.
    async fn first_rowid(&self, filter: &Filter) -> Result<Option<Value>> {
        let select = Select::new(self.name())
            .projection(Projection {
                columns: vec!["rowid".to_string()],
            })
            .filter(filter.clone())
            .pagination(Pagination::limit(1));

        let result = self.query(select.into(), Consistency::Strong).await?;

        Ok(result
            .values
            .into_iter()
            .next()
            .and_then(|row| row.into_iter().next())
            .filter(|rowid| !rowid.is_null()))
    }

    fn parser(&self) -> Parser<'_> {
        Parser {
            fields: &self.fields,
            table: self.name(),
            config: self.client.config(),
        }
    }

    fn default_consistency(&self) -> Consistency {
        Consistency::bounded(self.client.config())
    }

    fn is_unique_filter(&self, filter: &Filter) -> bool {
        let mut key = self.def.primary_key().peekable();

        if key.peek().is_some() && key.all(|column| filter.equality_on(&column.name).is_some()) {
            return true;
        }

        self.def
            .columns
            .iter()
            .filter(|column| column.unique)
            .any(|column| filter.equality_on(&column.name).is_some())
    }

    /// Filter selecting the updated row by its key, when the key is known
    /// after the update.
    fn reread_filter(&self, assignments: &Assignments, filter: &Filter) -> Option<Filter> {
        let key = self.def.single_primary_key()?;

        let value = match assignments.literal(&key.name) {
            Some(value) => value,
            None if assignments.touches(&key.name) => return None,
            None => filter.equality_on(&key.name)?,
        };

        Some(Filter::eq(key.name.clone(), value.clone()))
    }
}
