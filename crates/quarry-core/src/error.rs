mod adhoc;
mod invalid_order_direction;
mod invalid_pagination;
mod invalid_result;
mod invalid_schema;
mod invalid_statement;
mod payload_too_large;
mod schema_mismatch;
mod transient_network_failure;
mod transport_policy_violation;
mod unknown_operator;
mod unreachable;
mod unsafe_expression;

use adhoc::AdhocError;
use invalid_order_direction::InvalidOrderDirection;
use invalid_pagination::InvalidPagination;
use invalid_result::InvalidResult;
use invalid_schema::InvalidSchema;
use invalid_statement::InvalidStatement;
use payload_too_large::PayloadTooLarge;
use schema_mismatch::SchemaMismatch;
use std::sync::Arc;
use transient_network_failure::TransientNetworkFailure;
use transport_policy_violation::TransportPolicyViolation;
use unknown_operator::UnknownOperator;
use unreachable::Unreachable;
use unsafe_expression::UnsafeExpression;

/// Returns early with an ad-hoc error built from format arguments.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Creates an ad-hoc error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// An error that can occur in Quarry.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context is shown first,
    /// followed by earlier context, ending with the root cause.
    #[inline(always)]
    pub fn context(self, consequent: impl IntoError) -> Error {
        self.context_impl(consequent.into_error())
    }

    #[inline(never)]
    #[cold]
    fn context_impl(self, consequent: Error) -> Error {
        let mut err = consequent;

        match Arc::get_mut(&mut err.inner) {
            Some(inner) if inner.cause.is_none() => {
                inner.cause = Some(self);
                err
            }
            // The consequent is shared or already chained; keep its message and
            // attach the cause to a fresh copy.
            _ => Error::from_args(format_args!("{err}")).context(self),
        }
    }

    /// Returns the error that caused this one, if any.
    pub fn cause(&self) -> Option<&Error> {
        self.inner.cause.as_ref()
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::TransientNetworkFailure(err) => std::error::Error::source(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Adhoc(AdhocError),
    SchemaMismatch(SchemaMismatch),
    UnknownOperator(UnknownOperator),
    UnsafeExpression(UnsafeExpression),
    InvalidOrderDirection(InvalidOrderDirection),
    InvalidPagination(InvalidPagination),
    InvalidStatement(InvalidStatement),
    InvalidSchema(InvalidSchema),
    InvalidResult(InvalidResult),
    PayloadTooLarge(PayloadTooLarge),
    TransportPolicyViolation(TransportPolicyViolation),
    TransientNetworkFailure(TransientNetworkFailure),
    Unreachable(Unreachable),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            SchemaMismatch(err) => core::fmt::Display::fmt(err, f),
            UnknownOperator(err) => core::fmt::Display::fmt(err, f),
            UnsafeExpression(err) => core::fmt::Display::fmt(err, f),
            InvalidOrderDirection(err) => core::fmt::Display::fmt(err, f),
            InvalidPagination(err) => core::fmt::Display::fmt(err, f),
            InvalidStatement(err) => core::fmt::Display::fmt(err, f),
            InvalidSchema(err) => core::fmt::Display::fmt(err, f),
            InvalidResult(err) => core::fmt::Display::fmt(err, f),
            PayloadTooLarge(err) => core::fmt::Display::fmt(err, f),
            TransportPolicyViolation(err) => core::fmt::Display::fmt(err, f),
            TransientNetworkFailure(err) => core::fmt::Display::fmt(err, f),
            Unreachable(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from_args(format_args!("json: {err}"))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::from_args(format_args!("invalid url: {err}"))
    }
}

/// Trait for types that can be converted into an Error.
pub trait IntoError {
    /// Converts this type into an Error.
    fn into_error(self) -> Error;
}

impl IntoError for Error {
    #[inline(always)]
    fn into_error(self) -> Error {
        self
    }
}
