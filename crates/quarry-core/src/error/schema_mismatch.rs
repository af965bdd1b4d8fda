use super::Error;

/// Error when a filter, update, projection or ordering references a field the
/// table does not define.
///
/// This is always a caller bug and is never retried.
#[derive(Debug)]
pub(super) struct SchemaMismatch {
    table: Box<str>,
    field: Box<str>,
}

impl std::error::Error for SchemaMismatch {}

impl core::fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "schema mismatch: unknown field `{}` on table `{}`",
            self.field, self.table
        )
    }
}

impl Error {
    /// Creates a schema mismatch error for `field` on `table`.
    pub fn schema_mismatch(table: impl Into<String>, field: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaMismatch(SchemaMismatch {
            table: table.into().into(),
            field: field.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema mismatch.
    pub fn is_schema_mismatch(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::SchemaMismatch(_))
    }
}
