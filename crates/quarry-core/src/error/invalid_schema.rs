use super::Error;

/// A table declaration that cannot be used.
///
/// Raised by `TableDef::verify` and by endpoint parsing, before a table is
/// bound to a client.
#[derive(Debug)]
pub(super) struct InvalidSchema {
    /// Table the problem was found on, when known
    table: Option<Box<str>>,
    message: Box<str>,
}

impl std::error::Error for InvalidSchema {}

impl core::fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.table {
            Some(table) => write!(f, "invalid table `{table}`: {}", self.message),
            None => write!(f, "invalid schema: {}", self.message),
        }
    }
}

impl Error {
    pub fn invalid_schema(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            table: None,
            message: message.into().into(),
        }))
    }

    /// An invalid declaration of `table`.
    pub fn invalid_table(table: impl Into<String>, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidSchema(InvalidSchema {
            table: Some(table.into().into()),
            message: message.into().into(),
        }))
    }

    pub fn is_invalid_schema(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidSchema(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_the_table() {
        assert_eq!(
            Error::invalid_table("users", "has no columns").to_string(),
            "invalid table `users`: has no columns"
        );
        assert_eq!(
            Error::invalid_schema("endpoint `ftp://x` has unsupported scheme `ftp`").to_string(),
            "invalid schema: endpoint `ftp://x` has unsupported scheme `ftp`"
        );
    }
}
