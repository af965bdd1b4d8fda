use super::Error;

/// Terminal error when every endpoint failed.
///
/// The last underlying failure is kept as the error's cause.
#[derive(Debug)]
pub(super) struct Unreachable {
    attempts: usize,
}

impl std::error::Error for Unreachable {}

impl core::fmt::Display for Unreachable {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "all endpoints unreachable after {} attempt{}",
            self.attempts,
            if self.attempts == 1 { "" } else { "s" }
        )
    }
}

impl Error {
    /// Creates an unreachable error after `attempts` failed attempts.
    pub fn unreachable(attempts: usize, last: Option<Error>) -> Error {
        let err = Error::from(super::ErrorKind::Unreachable(Unreachable { attempts }));

        match last {
            Some(last) => last.context(err),
            None => err,
        }
    }

    /// Returns `true` if this error is an unreachable error.
    pub fn is_unreachable(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::Unreachable(_))
    }

    /// Number of attempts made before giving up, if this is an unreachable error.
    pub fn unreachable_attempts(&self) -> Option<usize> {
        match self.kind() {
            super::ErrorKind::Unreachable(err) => Some(err.attempts),
            _ => None,
        }
    }
}
