#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod ident;
use ident::Ident;

mod params;
use params::Namespace;
pub use params::{Params, Placeholder};

// Fragment serializers
mod assignment;
mod column_def;
mod filter;
mod literal;
mod statement;

use crate::{stmt::Statement, Assignments, Filter};

use quarry_core::{driver, Value};

/// Serialize statements and fragments to SQL text with named parameters.
///
/// Every call starts a fresh, process-unique parameter namespace, so the
/// parameter names of two compilations never collide even when their SQL
/// ends up in the same request.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer {
    _priv: (),
}

/// SQL text together with the values its placeholders refer to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compiled {
    pub sql: String,
    pub params: Params,
}

struct Formatter<'a> {
    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut Params,

    /// Namespace new parameter names are drawn from
    ns: Namespace,
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn serialize(&self, stmt: &Statement) -> Compiled {
        self.compile(|f| stmt.to_sql(f))
    }

    /// Serialize a filter into a boolean clause.
    pub fn filter(&self, filter: &Filter) -> (String, Params) {
        let compiled = self.compile(|f| filter.to_sql(f));
        (compiled.sql, compiled.params)
    }

    /// Serialize assignments into the body of a `SET` clause.
    pub fn assignments(&self, assignments: &Assignments) -> (String, Params) {
        let compiled = self.compile(|f| assignments.to_sql(f));
        (compiled.sql, compiled.params)
    }

    fn compile(&self, emit: impl FnOnce(&mut Formatter<'_>)) -> Compiled {
        let mut sql = String::new();
        let mut params = Params::new();

        let mut fmt = Formatter {
            dst: &mut sql,
            params: &mut params,
            ns: Namespace::root(),
        };

        emit(&mut fmt);

        Compiled { sql, params }
    }
}

impl Formatter<'_> {
    /// Binds `value` under a fresh name and returns its placeholder.
    ///
    /// Objects and arrays are bound as their JSON text.
    fn bind(&mut self, value: &Value) -> Placeholder {
        let value = match value {
            Value::Object(_) | Value::Array(_) => Value::String(value.to_string()),
            value => value.clone(),
        };

        let name = self.ns.next_name();
        self.params.insert(name.clone(), value);
        Placeholder(name)
    }

    /// Runs `emit` inside a child namespace.
    fn scoped(&mut self, emit: impl FnOnce(&mut Self)) {
        let child = self.ns.child();
        let parent = std::mem::replace(&mut self.ns, child);
        emit(self);
        self.ns = parent;
    }
}

impl From<Compiled> for driver::Statement {
    fn from(value: Compiled) -> Self {
        driver::Statement::with_params(value.sql, value.params.into_inner())
    }
}
