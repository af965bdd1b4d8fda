use super::Error;

/// The store answered with a body that decoded, but not into what the
/// operation needs: a missing result entry, a row whose width does not match
/// its columns, or a cell of the wrong type.
#[derive(Debug)]
pub(super) struct InvalidResult {
    /// Index of the offending row, for row-level problems
    row: Option<usize>,
    message: Box<str>,
}

impl std::error::Error for InvalidResult {}

impl core::fmt::Display for InvalidResult {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("unexpected response from store")?;

        if let Some(row) = self.row {
            write!(f, " at row {row}")?;
        }

        write!(f, ": {}", self.message)
    }
}

impl Error {
    pub fn invalid_result(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            row: None,
            message: message.into().into(),
        }))
    }

    /// A malformed row at position `row` of a result.
    pub fn invalid_row(row: usize, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResult(InvalidResult {
            row: Some(row),
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_result(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidResult(_))
    }
}
