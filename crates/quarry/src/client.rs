use crate::{Batch, SchemaCache, SyncReport, Table};

use quarry_core::{driver::Transport, Config, Result, TableDef};
use quarry_driver_http::Dispatcher;
use std::sync::Arc;

/// Entry point: owns the configuration, the dispatcher and the schema cache
/// shared by every [`Table`] created from it.
///
/// Cloning is cheap and clones share the same cache.
#[derive(Debug, Clone)]
pub struct Client {
    shared: Arc<Shared>,
}

#[derive(Debug)]
struct Shared {
    dispatcher: Dispatcher,
    cache: SchemaCache,
}

impl Client {
    /// A client speaking HTTP to the store.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::from_parts(Dispatcher::new(config)?, SchemaCache::new()))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self::from_parts(
            Dispatcher::with_transport(config, transport),
            SchemaCache::new(),
        )
    }

    pub fn from_parts(dispatcher: Dispatcher, cache: SchemaCache) -> Self {
        Self {
            shared: Arc::new(Shared { dispatcher, cache }),
        }
    }

    pub fn config(&self) -> &Config {
        self.shared.dispatcher.config()
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.shared.dispatcher
    }

    pub fn schema_cache(&self) -> &SchemaCache {
        &self.shared.cache
    }

    /// Binds a table definition to this client after validating it.
    pub fn table(&self, def: TableDef) -> Result<Table> {
        def.verify()?;
        Ok(Table::new(self.clone(), def))
    }

    /// Starts an empty batch of writes.
    pub fn batch(&self) -> Batch {
        Batch::new(self.clone())
    }

    /// Migrates each table in turn, stopping at the first failure.
    pub async fn sync(&self, tables: &[Table]) -> Result<Vec<SyncReport>> {
        let mut reports = Vec::with_capacity(tables.len());

        for table in tables {
            reports.push(table.sync().await?);
        }

        Ok(reports)
    }
}
