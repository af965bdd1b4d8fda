use crate::{row, Table};

use quarry_core::{driver::Consistency, schema::ColumnInfo, Result};
use quarry_sql::stmt::Statement;

/// Outcome of migrating one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub table: String,

    /// Declared columns that were missing remotely and have been added
    pub added: Vec<String>,

    /// Remote columns that are not declared. They are left untouched.
    pub undeclared: Vec<String>,
}

impl SyncReport {
    /// True when the remote table already matched the declaration.
    pub fn is_unchanged(&self) -> bool {
        self.added.is_empty()
    }
}

impl Table {
    /// Brings the remote table up to the declared schema without losing data.
    ///
    /// Creates the table when it does not exist and adds declared columns
    /// that are missing. Existing columns are never altered or dropped.
    pub async fn sync(&self) -> Result<SyncReport> {
        self.execute(vec![self.compile(Statement::create_table(self.def()))])
            .await?;

        let remote = self.remote_columns().await?;

        let mut report = SyncReport {
            table: self.name().to_string(),
            ..SyncReport::default()
        };

        let missing: Vec<_> = self
            .def()
            .columns
            .iter()
            .filter(|column| !remote.iter().any(|info| info.name == column.name))
            .collect();

        if !missing.is_empty() {
            let statements = missing
                .iter()
                .map(|column| self.compile(Statement::add_column(self.name(), column)))
                .collect();

            // A failed attempt is replayed in full on the next endpoint, so
            // the statements must commit together
            let result = self.transaction(statements).await;

            // The transaction may have committed even when no answer arrived
            self.client().schema_cache().invalidate(&self.key());
            result?;

            report.added = missing.iter().map(|column| column.name.clone()).collect();

            tracing::info!(
                table = self.name(),
                columns = ?report.added,
                "added missing columns"
            );
        }

        report.undeclared = remote
            .iter()
            .filter(|info| !self.fields().contains(&info.name))
            .map(|info| info.name.clone())
            .collect();

        if !report.undeclared.is_empty() {
            tracing::warn!(
                table = self.name(),
                columns = ?report.undeclared,
                "remote table has undeclared columns"
            );
        }

        Ok(report)
    }

    /// Live columns of the table, from the schema cache or, on a miss, from
    /// `PRAGMA table_info` read at strong consistency.
    pub async fn remote_columns(&self) -> Result<Vec<ColumnInfo>> {
        let key = self.key();
        let cache = self.client().schema_cache();

        if let Some(columns) = cache.get(&key) {
            return Ok(columns);
        }

        let result = self
            .query(Statement::table_info(self.name()), Consistency::Strong)
            .await?;

        let columns = row::rows(result)?
            .iter()
            .map(ColumnInfo::from_row)
            .collect::<Result<Vec<_>>>()?;

        cache.set(key, columns.clone());
        Ok(columns)
    }
}
