use super::Error;

/// Error when an insecure endpoint is skipped because TLS is required.
///
/// Only that endpoint is skipped; the dispatcher moves on to the next one.
#[derive(Debug)]
pub(super) struct TransportPolicyViolation {
    endpoint: Box<str>,
}

impl std::error::Error for TransportPolicyViolation {}

impl core::fmt::Display for TransportPolicyViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "transport policy violation: {} is not secured and TLS is required",
            self.endpoint
        )
    }
}

impl Error {
    /// Creates a transport policy violation error for `endpoint`.
    pub fn transport_policy_violation(endpoint: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::TransportPolicyViolation(
            TransportPolicyViolation {
                endpoint: endpoint.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a transport policy violation.
    pub fn is_transport_policy_violation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TransportPolicyViolation(_))
    }
}
