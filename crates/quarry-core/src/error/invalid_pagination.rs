use super::Error;

/// Error when `limit` or `offset` is negative, fractional or not a number.
#[derive(Debug)]
pub(super) struct InvalidPagination {
    message: Box<str>,
}

impl std::error::Error for InvalidPagination {}

impl core::fmt::Display for InvalidPagination {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid pagination: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid pagination error.
    pub fn invalid_pagination(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidPagination(InvalidPagination {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid pagination error.
    pub fn is_invalid_pagination(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidPagination(_))
    }
}
