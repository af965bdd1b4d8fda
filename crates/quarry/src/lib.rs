//! Prisma-style access to tables of a replicated, HTTP-fronted SQLite store.
//!
//! A [`Client`] owns the configuration, the dispatcher and the schema cache.
//! [`Client::table`] binds a [`TableDef`] to the client and returns a
//! [`Table`], whose operations take loosely typed `serde_json::Value`
//! arguments, compile them into parameterized SQL and send them to the first
//! endpoint that answers.

mod args;

mod batch;
pub use batch::Batch;

pub mod cache;
pub use cache::{SchemaCache, TableKey};

mod client;
pub use client::Client;

mod row;
pub use row::Row;

mod sync;
pub use sync::SyncReport;

mod table;
pub use table::Table;

pub use quarry_core::{
    bail, driver, err,
    schema::{Column, ColumnInfo, ColumnType, TableDef},
    Config, Error, Result, Value,
};
pub use quarry_driver_http::Dispatcher;
