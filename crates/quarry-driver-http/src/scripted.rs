//! An in-memory [`Transport`] with canned answers per host.
//!
//! Useful for exercising retry and failover without a cluster. Every request
//! is logged before it is answered, including requests that fail.

use quarry_core::{
    async_trait,
    driver::{HttpRequest, HttpResponse, Transport},
    Error, Result, Value,
};
use std::{
    collections::{HashMap, VecDeque},
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Arc<Mutex<State>>,
}

/// How a host answers one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// `200 OK` with this JSON body
    Json(Value),

    /// An arbitrary status and raw body
    Status(u16, String),

    /// The connection is refused
    Refused,

    /// No answer within any reasonable timeout
    Hang,
}

#[derive(Debug, Default)]
struct State {
    hosts: HashMap<String, Host>,
    log: Vec<HttpRequest>,
}

#[derive(Debug, Default)]
struct Host {
    /// Answers consumed one per request
    queue: VecDeque<Reply>,

    /// Answer once the queue is empty
    fallback: Option<Reply>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues one reply from `host`.
    pub fn push(&self, host: &str, reply: Reply) -> &Self {
        self.state().host(host).queue.push_back(reply);
        self
    }

    /// Queues a `200 OK` JSON reply from `host`.
    pub fn push_json(&self, host: &str, body: Value) -> &Self {
        self.push(host, Reply::Json(body))
    }

    /// Sets the reply `host` gives once its queue is drained.
    pub fn always(&self, host: &str, reply: Reply) -> &Self {
        self.state().host(host).fallback = Some(reply);
        self
    }

    /// Makes `host` refuse every connection.
    pub fn down(&self, host: &str) -> &Self {
        self.always(host, Reply::Refused)
    }

    /// Every request received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state().log.clone()
    }

    /// Hosts in the order they were contacted.
    pub fn hosts(&self) -> Vec<String> {
        self.state()
            .log
            .iter()
            .map(|request| request.url.host_str().unwrap_or_default().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state().log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().log.is_empty()
    }

    pub fn clear(&self) {
        self.state().log.clear();
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl State {
    fn host(&mut self, host: &str) -> &mut Host {
        self.hosts.entry(host.to_string()).or_default()
    }
}

impl Host {
    fn next(&mut self) -> Reply {
        self.queue
            .pop_front()
            .or_else(|| self.fallback.clone())
            .unwrap_or(Reply::Refused)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse> {
        let origin = request.url.origin().ascii_serialization();
        let host = request.url.host_str().unwrap_or_default().to_string();

        let reply = {
            let mut state = self.state();
            state.log.push(request);
            state.host(&host).next()
        };

        match reply {
            Reply::Json(body) => Ok(HttpResponse {
                status: 200,
                body: body.to_string(),
            }),
            Reply::Status(status, body) => Ok(HttpResponse { status, body }),
            Reply::Refused => Err(Error::transient_network_failure(
                origin,
                "connection refused",
            )),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(24 * 60 * 60)).await;
                Err(Error::transient_network_failure(origin, "no answer"))
            }
        }
    }
}

impl fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        f.debug_struct("ScriptedTransport")
            .field("hosts", &state.hosts)
            .field("requests", &state.log.len())
            .finish()
    }
}
