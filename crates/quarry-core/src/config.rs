use crate::Result;

use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Environment variable consulted to detect production deployments, where
/// verbose request logging is always suppressed.
pub const ENV_VAR: &str = "QUARRY_ENV";

/// Configuration for a Quarry client and its dispatcher.
///
/// Each client holds its own `Config`; nothing is process-wide. The struct
/// deserializes from the recognized keys `timeout` (ms), `verbose`,
/// `freshness` (duration string such as `"5m"` or `"500ms"`),
/// `freshnessStrict`, `retryDelay` (ms), `maxRequestSize` (bytes) and
/// `requireTLS`. Missing keys keep their defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Deadline for a single attempt against one endpoint
    #[serde(deserialize_with = "millis")]
    pub timeout: Duration,

    /// Emit debug logs for every request attempt
    pub verbose: bool,

    /// Staleness bound used by bounded-consistency reads
    #[serde(deserialize_with = "duration_str")]
    pub freshness: Duration,

    /// Ask the store to reject reads that cannot honor the freshness bound
    pub freshness_strict: bool,

    /// Base delay of the linear backoff between endpoint attempts
    #[serde(deserialize_with = "millis")]
    pub retry_delay: Duration,

    /// Largest serialized request body that will be sent, in bytes
    pub max_request_size: usize,

    /// Refuse to talk to endpoints that are not `https`
    #[serde(rename = "requireTLS")]
    pub require_tls: bool,

    #[serde(skip)]
    production: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            verbose: false,
            freshness: Duration::from_secs(5 * 60),
            freshness_strict: false,
            retry_delay: Duration::from_millis(100),
            max_request_size: 10 * 1024 * 1024,
            require_tls: false,
            production: std::env::var(ENV_VAR)
                .map(|env| env.eq_ignore_ascii_case("production"))
                .unwrap_or(false),
        }
    }
}

impl Config {
    /// Create a new Config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a Config from a JSON object using the recognized keys.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Set the per-attempt timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable verbose request logging
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set the staleness bound for bounded reads
    pub fn freshness(mut self, freshness: Duration) -> Self {
        self.freshness = freshness;
        self
    }

    /// Set whether bounded reads are strict about freshness
    pub fn freshness_strict(mut self, strict: bool) -> Self {
        self.freshness_strict = strict;
        self
    }

    /// Set the base backoff delay between endpoint attempts
    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Set the maximum request body size in bytes
    pub fn max_request_size(mut self, bytes: usize) -> Self {
        self.max_request_size = bytes;
        self
    }

    /// Require `https` endpoints
    pub fn require_tls(mut self, require: bool) -> Self {
        self.require_tls = require;
        self
    }

    /// Mark this configuration as running in production, which suppresses
    /// verbose logging regardless of [`Config::verbose`].
    pub fn production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Returns `true` when debug request logging should be emitted.
    pub fn verbose_enabled(&self) -> bool {
        self.verbose && !self.production
    }
}

fn millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}

fn duration_str<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    humantime::parse_duration(&s).map_err(serde::de::Error::custom)
}
