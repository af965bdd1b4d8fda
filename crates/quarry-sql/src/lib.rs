//! Compiles Prisma-style filter, update, ordering and pagination objects into
//! parameterized SQL for the store's SQLite engine.
//!
//! Compilation happens in two steps. Loosely typed caller input
//! (`serde_json::Value`) is first parsed against a table's [`FieldSet`] into
//! closed types ([`Filter`], [`Assignments`], [`OrderBy`], [`Pagination`]).
//! The [`Serializer`] then walks those types and emits SQL text in which every
//! value is referenced by a generated `:name` placeholder and every identifier
//! is quoted.

pub mod assignment;
pub use assignment::{Assignment, AssignmentOp, Assignments, MathExpr};

pub mod filter;
pub use filter::{FieldCondition, Filter, Op};

pub mod math;

mod order_by;
pub use order_by::{Direction, OrderBy};

mod pagination;
pub use pagination::Pagination;

mod projection;
pub use projection::Projection;

pub mod serializer;
pub use serializer::{Compiled, Params, Serializer};

pub mod stmt;
pub use stmt::Statement;

use quarry_core::{FieldSet, Result, Value};

/// Parses and serializes a `where` object into a boolean SQL clause.
///
/// An absent (`null`) or empty filter compiles to `1 = 1` with no parameters.
pub fn compile_filter(input: &Value, fields: &FieldSet, table: &str) -> Result<Compiled> {
    let filter = Filter::parse(input, fields, table)?;
    let (sql, params) = Serializer::new().filter(&filter);
    Ok(Compiled { sql, params })
}

/// Parses and serializes an update object into the body of a `SET` clause.
pub fn compile_update(input: &Value, fields: &FieldSet, table: &str) -> Result<Compiled> {
    let assignments = Assignments::parse(input, fields, table)?;
    let (sql, params) = Serializer::new().assignments(&assignments);
    Ok(Compiled { sql, params })
}
