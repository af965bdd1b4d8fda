use super::Error;

/// Caller input that cannot be turned into a statement.
///
/// Covers argument objects with the wrong shape (`OR` given an object, `in`
/// given a scalar, unknown argument keys), updates without assignments and
/// unique lookups that do not pin a key. Always raised before any request is
/// sent.
#[derive(Debug)]
pub(super) struct InvalidStatement {
    message: Box<str>,
}

impl std::error::Error for InvalidStatement {}

impl core::fmt::Display for InvalidStatement {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("invalid statement: ")?;
        f.write_str(&self.message)
    }
}

impl Error {
    pub fn invalid_statement(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidStatement(InvalidStatement {
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_statement(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidStatement(_))
    }
}
