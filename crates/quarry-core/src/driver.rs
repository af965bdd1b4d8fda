mod auth;
pub use auth::Auth;

mod consistency;
pub use consistency::Consistency;

mod endpoint;
pub use endpoint::{order_local_first, Endpoint, Scheme};

mod request;
pub use request::{Request, RequestKind, Statement};

mod response;
pub use response::{QueryResult, Response};

use crate::{async_trait, Result};

use std::fmt::Debug;
use url::Url;

/// Moves one serialized request body to one endpoint and back.
///
/// The dispatcher owns retry, ordering and timeout policy; a transport only
/// performs a single HTTP `POST`. Failures that happen before a status line is
/// received are reported as [`Error::transient_network_failure`].
///
/// [`Error::transient_network_failure`]: crate::Error::transient_network_failure
#[async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    /// Issue one `POST` request.
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// A single HTTP request handed to a [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Fully-qualified URL, including the path and query string
    pub url: Url,

    /// JSON request body
    pub body: String,

    /// Basic credentials, when configured
    pub auth: Option<Auth>,
}

/// The raw answer to an [`HttpRequest`].
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
