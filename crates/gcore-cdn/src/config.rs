//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::error::{Error, Result};

/// Default base URL of the G-Core CDN API.
pub const DEFAULT_BASE_URL: &str = "https://api.gcdn.co";

/// Default value of the `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("gcore-cdn/", env!("CARGO_PKG_VERSION"));

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TCP_KEEPALIVE_SECS: u64 = 60;
const DEFAULT_POOL_IDLE_TIMEOUT_SECS: u64 = 100;
const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL every request path is resolved against
    pub base_url: Url,

    /// Value of the `User-Agent` header
    pub user_agent: String,

    /// Whole-request timeout, applied even when the caller sets no deadline
    pub request_timeout: Duration,

    /// Connection establishment timeout
    pub connect_timeout: Duration,

    /// TCP keep-alive period for active connections
    pub tcp_keepalive: Option<Duration>,

    /// How long an idle pooled connection is kept open
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Subscriber that receives this client's log events.
    ///
    /// When unset, events go to the global default subscriber, which
    /// discards them unless the application installed one.
    #[serde(skip)]
    pub logger: Option<tracing::Dispatch>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            tcp_keepalive: Some(Duration::from_secs(DEFAULT_TCP_KEEPALIVE_SECS)),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT_SECS),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            logger: None,
        }
    }
}

impl ClientConfig {
    /// Configuration pointing at another base URL, defaults otherwise.
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            ..Self::default()
        })
    }

    /// Create configuration from environment variables
    ///
    /// Reads `GCORE_BASE_URL`, `GCORE_USER_AGENT`, `GCORE_REQUEST_TIMEOUT`
    /// and `GCORE_CONNECT_TIMEOUT` (seconds). Unset variables and unparsable
    /// timeouts fall back to the defaults; an invalid base URL is an error.
    pub fn from_env() -> Result<Self> {
        let base_url = match std::env::var("GCORE_BASE_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => default_base_url(),
        };

        Ok(Self {
            base_url,
            user_agent: std::env::var("GCORE_USER_AGENT")
                .unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string()),
            request_timeout: Duration::from_secs(
                std::env::var("GCORE_REQUEST_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("GCORE_CONNECT_TIMEOUT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            ..Self::default()
        })
    }

    /// Route this client's log events to `dispatch`.
    pub fn with_logger(mut self, dispatch: tracing::Dispatch) -> Self {
        self.logger = Some(dispatch);
        self
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::config(format!("invalid base URL {raw:?}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::config(format!("{raw:?} cannot be used as a base URL")));
    }
    Ok(url)
}

fn default_base_url() -> Url {
    #[allow(clippy::expect_used)]
    // expect_used: DEFAULT_BASE_URL is a constant, valid URL.
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}
