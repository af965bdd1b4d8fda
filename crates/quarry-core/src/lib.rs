pub mod config;
pub use config::Config;

pub mod driver;
pub use driver::Transport;

mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{FieldSet, TableDef};

/// A Result type alias that uses Quarry's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Values bound to statements and returned in rows.
pub use serde_json::Value;

pub use async_trait::async_trait;
