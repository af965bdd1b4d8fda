mod dispatcher;
pub use dispatcher::Dispatcher;

pub mod scripted;
pub use scripted::ScriptedTransport;

use quarry_core::{
    async_trait,
    driver::{HttpRequest, HttpResponse, Transport},
    Error, Result,
};
use reqwest::header::CONTENT_TYPE;

/// [`Transport`] backed by a shared [`reqwest::Client`].
///
/// The client keeps connections alive between requests, so one
/// `HttpTransport` should be reused for every endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| Error::from_args(format_args!("failed to build HTTP client: {err}")))?;

        Ok(Self::with_client(client))
    }

    /// Uses an already-configured client, e.g. one with custom root
    /// certificates.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let origin = request.url.origin().ascii_serialization();

        let mut builder = self
            .client
            .post(request.url)
            .header(CONTENT_TYPE, "application/json")
            .body(request.body);

        if let Some(auth) = &request.auth {
            builder = builder.basic_auth(&auth.username, Some(&auth.password));
        }

        let response = builder
            .send()
            .await
            .map_err(|err| Error::transient_network_source(origin.as_str(), err))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| Error::transient_network_source(origin.as_str(), err))?;

        Ok(HttpResponse { status, body })
    }
}
