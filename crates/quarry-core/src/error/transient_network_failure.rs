use super::Error;

/// Error when a single attempt against one endpoint fails.
///
/// This wraps:
/// - Timeouts
/// - Connection and transport errors from the HTTP client
/// - Non-2xx responses and undecodable bodies
/// - Statement-level errors reported by the store
///
/// The dispatcher retries these against the remaining endpoints.
#[derive(Debug)]
pub(super) struct TransientNetworkFailure {
    endpoint: Box<str>,
    message: Box<str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl std::error::Error for TransientNetworkFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|err| err.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl core::fmt::Display for TransientNetworkFailure {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "transient network failure at {}: {}",
            self.endpoint, self.message
        )?;
        // Walk the source chain of the underlying client error
        let mut source = self.source.as_ref().and_then(|err| err.source());
        while let Some(err) = source {
            write!(f, ": {}", err)?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates a transient network failure with a message.
    pub fn transient_network_failure(
        endpoint: impl Into<String>,
        message: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::TransientNetworkFailure(
            TransientNetworkFailure {
                endpoint: endpoint.into().into(),
                message: message.into().into(),
                source: None,
            },
        ))
    }

    /// Creates a transient network failure from an HTTP client error.
    ///
    /// The error's message becomes the failure message and its source chain is
    /// kept for display.
    pub fn transient_network_source(
        endpoint: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Error {
        Error::from(super::ErrorKind::TransientNetworkFailure(
            TransientNetworkFailure {
                endpoint: endpoint.into().into(),
                message: err.to_string().into(),
                source: Some(Box::new(err)),
            },
        ))
    }

    /// Returns `true` if this error is a transient network failure.
    pub fn is_transient_network_failure(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::TransientNetworkFailure(_))
    }
}
