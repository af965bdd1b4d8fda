use super::Error;

/// Error when a serialized request body exceeds the configured size limit.
///
/// Raised before any network activity; never retried.
#[derive(Debug)]
pub(super) struct PayloadTooLarge {
    size: usize,
    limit: usize,
}

impl std::error::Error for PayloadTooLarge {}

impl core::fmt::Display for PayloadTooLarge {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "payload too large: {} bytes exceeds the {} byte limit",
            self.size, self.limit
        )
    }
}

impl Error {
    /// Creates a payload too large error.
    pub fn payload_too_large(size: usize, limit: usize) -> Error {
        Error::from(super::ErrorKind::PayloadTooLarge(PayloadTooLarge { size, limit }))
    }

    /// Returns `true` if this error is a payload too large error.
    pub fn is_payload_too_large(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::PayloadTooLarge(_))
    }
}
