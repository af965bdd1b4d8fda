use crate::HttpTransport;

use quarry_core::{
    driver::{
        order_local_first, Auth, Consistency, Endpoint, HttpRequest, Request, Response, Statement,
        Transport,
    },
    Config, Error, Result,
};
use std::sync::Arc;

/// Sends requests to the first endpoint of a port that answers.
///
/// Endpoints are tried loopback-first, one at a time, with a linearly growing
/// pause between attempts (`retry_delay * attempt`). Each attempt is bounded
/// by the configured timeout. An attempt fails on a transport error, a
/// timeout, a non-2xx status, an undecodable body or a statement-level error
/// in the results; the dispatcher then moves on to the next endpoint.
///
/// Dropping the returned future cancels the request, including any pending
/// backoff.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: Config,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    /// A dispatcher speaking HTTP through [`HttpTransport`].
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self::with_transport(config, Arc::new(HttpTransport::new()?)))
    }

    pub fn with_transport(config: Config, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs `statements` through the execute API.
    pub async fn execute(
        &self,
        endpoints: &[Endpoint],
        port: u16,
        statements: Vec<Statement>,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        self.send(endpoints, port, &Request::execute(statements), auth)
            .await
    }

    /// Runs `statements` as one atomic unit.
    pub async fn transaction(
        &self,
        endpoints: &[Endpoint],
        port: u16,
        statements: Vec<Statement>,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        self.send(endpoints, port, &Request::transaction(statements), auth)
            .await
    }

    pub async fn query(
        &self,
        endpoints: &[Endpoint],
        port: u16,
        statement: Statement,
        consistency: Consistency,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        self.send(endpoints, port, &Request::query(statement, consistency), auth)
            .await
    }

    pub async fn query_strong(
        &self,
        endpoints: &[Endpoint],
        port: u16,
        statement: Statement,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        self.query(endpoints, port, statement, Consistency::Strong, auth)
            .await
    }

    /// Queries at the configured freshness bound.
    pub async fn query_bounded(
        &self,
        endpoints: &[Endpoint],
        port: u16,
        statement: Statement,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        let consistency = Consistency::bounded(&self.config);
        self.query(endpoints, port, statement, consistency, auth)
            .await
    }

    pub async fn send(
        &self,
        endpoints: &[Endpoint],
        port: u16,
        request: &Request,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        let body = request.body()?;

        if body.len() > self.config.max_request_size {
            return Err(Error::payload_too_large(
                body.len(),
                self.config.max_request_size,
            ));
        }

        let path = request.path_and_query();
        let ordered = order_local_first(endpoints);
        let verbose = self.config.verbose_enabled();
        let mut last = None;

        for (attempt, endpoint) in ordered.iter().enumerate() {
            let backoff = self.config.retry_delay * attempt as u32;

            if !backoff.is_zero() {
                tokio::time::sleep(backoff).await;
            }

            if verbose {
                tracing::debug!(
                    endpoint = %endpoint,
                    port,
                    attempt,
                    backoff = ?backoff,
                    path = %path,
                    "sending request"
                );
            }

            match self.attempt(endpoint, port, &path, &body, auth).await {
                Ok(response) => {
                    if verbose {
                        tracing::debug!(
                            endpoint = %endpoint,
                            port,
                            attempt,
                            results = response.results.len(),
                            "request succeeded"
                        );
                    }
                    return Ok(response);
                }
                Err(err) => {
                    if verbose {
                        tracing::debug!(
                            endpoint = %endpoint,
                            port,
                            attempt,
                            error = %err,
                            "attempt failed"
                        );
                    }
                    last = Some(err);
                }
            }
        }

        let err = Error::unreachable(ordered.len(), last);
        tracing::warn!(port, error = %err, "request failed on every endpoint");
        Err(err)
    }

    async fn attempt(
        &self,
        endpoint: &Endpoint,
        port: u16,
        path: &str,
        body: &str,
        auth: Option<&Auth>,
    ) -> Result<Response> {
        if self.config.require_tls && !endpoint.is_secure() {
            return Err(Error::transport_policy_violation(endpoint.to_string()));
        }

        let request = HttpRequest {
            url: endpoint.url(port, path)?,
            body: body.to_string(),
            auth: auth.cloned(),
        };

        let response =
            match tokio::time::timeout(self.config.timeout, self.transport.post(request)).await {
                Ok(response) => response?,
                Err(_) => {
                    return Err(Error::transient_network_failure(
                        endpoint.to_string(),
                        format!("timed out after {:?}", self.config.timeout),
                    ))
                }
            };

        if !response.is_success() {
            return Err(Error::transient_network_failure(
                endpoint.to_string(),
                format!("HTTP status {}: {}", response.status, snippet(&response.body)),
            ));
        }

        let decoded: Response = serde_json::from_str(&response.body)
            .map_err(|err| Error::transient_network_source(endpoint.to_string(), err))?;

        if let Some(message) = decoded.first_error() {
            return Err(Error::transient_network_failure(
                endpoint.to_string(),
                format!("statement error: {message}"),
            ));
        }

        Ok(decoded)
    }
}

/// At most the first 200 characters of a response body.
fn snippet(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((at, _)) => &body[..at],
        None => body,
    }
}
