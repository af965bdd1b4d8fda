use super::Error;

#[derive(Debug)]
pub(super) struct InvalidOrderDirection {
    field: Box<str>,
    direction: Box<str>,
}

impl std::error::Error for InvalidOrderDirection {}

impl core::fmt::Display for InvalidOrderDirection {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid order direction `{}` for field `{}`; expected `asc` or `desc`",
            self.direction, self.field
        )
    }
}

impl Error {
    /// Creates an invalid order direction error.
    pub fn invalid_order_direction(
        field: impl Into<String>,
        direction: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InvalidOrderDirection(
            InvalidOrderDirection {
                field: field.into().into(),
                direction: direction.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an invalid order direction error.
    pub fn is_invalid_order_direction(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::InvalidOrderDirection(_))
    }
}
