use super::Error;

/// Error when a `math` update expression fails the safety gate.
///
/// This occurs when:
/// - The expression contains a character outside the arithmetic whitelist
/// - The expression contains a blocklisted SQL keyword or comment marker
#[derive(Debug)]
pub(super) struct UnsafeExpression {
    column: Box<str>,
    reason: Box<str>,
}

impl std::error::Error for UnsafeExpression {}

impl core::fmt::Display for UnsafeExpression {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unsafe expression for column `{}`: {}",
            self.column, self.reason
        )
    }
}

impl Error {
    /// Creates an unsafe expression error.
    pub fn unsafe_expression(column: impl Into<String>, reason: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::UnsafeExpression(UnsafeExpression {
            column: column.into().into(),
            reason: reason.into().into(),
        }))
    }

    /// Returns `true` if this error is an unsafe expression error.
    pub fn is_unsafe_expression(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnsafeExpression(_))
    }
}
