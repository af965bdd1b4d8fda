use super::Consistency;
use crate::{Result, Value};

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeTuple, Serializer};

/// One SQL statement with its named parameters.
///
/// Parameter names are stored without the `:` sigil. On the wire a statement
/// is the pair `[sql, {name: value, ...}]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: IndexMap<String, Value>,
}

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: IndexMap::new(),
        }
    }

    pub fn with_params(sql: impl Into<String>, params: IndexMap<String, Value>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }
}

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut pair = serializer.serialize_tuple(2)?;
        pair.serialize_element(&self.sql)?;
        pair.serialize_element(&self.params)?;
        pair.end()
    }
}

/// Which API a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// `/db/execute`, optionally as one atomic transaction.
    Execute { transaction: bool },

    /// `/db/query` at the given consistency.
    Query { consistency: Consistency },
}

/// A batch of statements bound for one API path.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub kind: RequestKind,
    pub statements: Vec<Statement>,
}

impl Request {
    pub fn execute(statements: Vec<Statement>) -> Self {
        Self {
            kind: RequestKind::Execute { transaction: false },
            statements,
        }
    }

    /// All statements succeed or fail together.
    pub fn transaction(statements: Vec<Statement>) -> Self {
        Self {
            kind: RequestKind::Execute { transaction: true },
            statements,
        }
    }

    pub fn query(statement: Statement, consistency: Consistency) -> Self {
        Self {
            kind: RequestKind::Query { consistency },
            statements: vec![statement],
        }
    }

    /// Path and query string, starting with `/`.
    pub fn path_and_query(&self) -> String {
        match self.kind {
            RequestKind::Execute { transaction } => {
                let mut path = String::from("/db/execute?named_parameters");
                if transaction {
                    path.push_str("&transaction");
                }
                path
            }
            RequestKind::Query { consistency } => {
                let mut path = String::from("/db/query?named_parameters");
                consistency.write_query(&mut path);
                path
            }
        }
    }

    /// JSON body: an array of `[sql, params]` pairs.
    pub fn body(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.statements)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn body_is_array_of_pairs() {
        let mut params = IndexMap::new();
        params.insert("b".to_string(), json!(2));
        params.insert("a".to_string(), json!("x"));

        let request = Request::execute(vec![
            Statement::with_params("INSERT INTO \"t\" (\"v\") VALUES (:b)", params),
            Statement::new("DELETE FROM \"t\""),
        ]);

        assert_eq!(
            request.body().unwrap(),
            r#"[["INSERT INTO \"t\" (\"v\") VALUES (:b)",{"b":2,"a":"x"}],["DELETE FROM \"t\"",{}]]"#
        );
    }

    #[test]
    fn paths() {
        assert_eq!(
            Request::execute(vec![]).path_and_query(),
            "/db/execute?named_parameters"
        );
        assert_eq!(
            Request::transaction(vec![]).path_and_query(),
            "/db/execute?named_parameters&transaction"
        );
        assert_eq!(
            Request::query(Statement::new("SELECT 1"), Consistency::Strong).path_and_query(),
            "/db/query?named_parameters&level=strong"
        );
    }
}
