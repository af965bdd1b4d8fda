use crate::Value;

use serde::Deserialize;

/// Decoded body of an execute or query call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub results: Vec<QueryResult>,

    /// Server-side processing time in seconds, when requested
    #[serde(default)]
    pub time: Option<f64>,
}

/// The outcome of one statement.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryResult {
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub types: Vec<String>,

    #[serde(default)]
    pub values: Vec<Vec<Value>>,

    #[serde(default)]
    pub rows_affected: Option<u64>,

    #[serde(default)]
    pub last_insert_id: Option<i64>,

    #[serde(default)]
    pub error: Option<String>,
}

impl Response {
    /// The first statement-level error reported by the store, if any.
    pub fn first_error(&self) -> Option<&str> {
        self.results
            .iter()
            .find_map(|result| result.error.as_deref())
    }

    /// Sum of `rows_affected` across all statements.
    pub fn rows_affected(&self) -> u64 {
        self.results
            .iter()
            .filter_map(|result| result.rows_affected)
            .sum()
    }
}
