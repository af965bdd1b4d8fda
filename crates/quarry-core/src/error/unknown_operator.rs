use super::Error;

/// Error when a field's operator map names an operator the compiler does not
/// recognize.
#[derive(Debug)]
pub(super) struct UnknownOperator {
    field: Box<str>,
    operator: Box<str>,
}

impl std::error::Error for UnknownOperator {}

impl core::fmt::Display for UnknownOperator {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unknown operator `{}` on field `{}`",
            self.operator, self.field
        )
    }
}

impl Error {
    /// Creates an unknown operator error.
    pub fn unknown_operator(field: impl Into<String>, operator: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnknownOperator(UnknownOperator {
            field: field.into().into(),
            operator: operator.into().into(),
        }))
    }

    /// Returns `true` if this error is an unknown operator error.
    pub fn is_unknown_operator(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnknownOperator(_))
    }
}
