use crate::{Error, Result};

use std::{fmt, str::FromStr};
use url::{Host, Url};

/// One network address through which a logical database port is reachable.
///
/// An endpoint is a scheme plus a host. The port is supplied separately by the
/// table or batch group that owns the endpoint, so the same address list can
/// serve several ports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    scheme: Scheme,
    host: Host<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Endpoint {
    /// Parses `http://host`, `https://host` or a bare `host` (which defaults
    /// to `http`).
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();

        let url = if input.contains("://") {
            Url::parse(input)?
        } else {
            Url::parse(&format!("http://{input}"))?
        };

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            other => {
                return Err(Error::invalid_schema(format!(
                    "endpoint `{input}` has unsupported scheme `{other}`"
                )))
            }
        };

        if url.port().is_some() {
            return Err(Error::invalid_schema(format!(
                "endpoint `{input}` must not carry a port; the port is configured per table"
            )));
        }

        let Some(host) = url.host() else {
            return Err(Error::invalid_schema(format!(
                "endpoint `{input}` has no host"
            )));
        };

        Ok(Self {
            scheme,
            host: host.to_owned(),
        })
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &Host<String> {
        &self.host
    }

    /// True for `localhost` and loopback IP addresses.
    pub fn is_local(&self) -> bool {
        match &self.host {
            Host::Domain(domain) => domain.eq_ignore_ascii_case("localhost"),
            Host::Ipv4(ip) => ip.is_loopback(),
            Host::Ipv6(ip) => ip.is_loopback(),
        }
    }

    /// True when requests to this endpoint travel over TLS.
    pub fn is_secure(&self) -> bool {
        self.scheme == Scheme::Https
    }

    /// Builds the URL for `path_and_query` (which must start with `/`) on
    /// `port`.
    pub fn url(&self, port: u16, path_and_query: &str) -> Result<Url> {
        Ok(Url::parse(&format!(
            "{}://{}:{port}{path_and_query}",
            self.scheme, self.host
        ))?)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        })
    }
}

/// Returns the endpoints with loopback addresses first.
///
/// The sort is stable: non-local endpoints keep their relative order, as do
/// local ones.
pub fn order_local_first(endpoints: &[Endpoint]) -> Vec<&Endpoint> {
    let mut ordered: Vec<&Endpoint> = endpoints.iter().collect();
    ordered.sort_by_key(|endpoint| !endpoint.is_local());
    ordered
}
