//! HTTP transport construction
//!
//! Builds the `reqwest` client used for every call. Timeouts always apply,
//! so a hung connection cannot block a caller that set no deadline.

use reqwest::{Client, ClientBuilder};
use std::sync::Once;

use crate::config::ClientConfig;
use crate::error::Result;

static CRYPTO_PROVIDER: Once = Once::new();

/// Install the ring crypto provider for rustls, once per process.
///
/// reqwest is built without a default provider. Installing fails harmlessly
/// when the application already installed one.
pub fn ensure_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        if rustls::crypto::ring::default_provider().install_default().is_err() {
            tracing::trace!("rustls crypto provider already installed");
        }
    });
}

/// Build the transport for `config`
pub fn build_http_client(config: &ClientConfig) -> Result<Client> {
    ensure_crypto_provider();

    let builder = ClientBuilder::new()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .tcp_keepalive(config.tcp_keepalive)
        .pool_idle_timeout(config.pool_idle_timeout)
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .user_agent(config.user_agent.as_str())
        .gzip(true)
        .deflate(true)
        .redirect(reqwest::redirect::Policy::limited(10));

    Ok(builder.build()?)
}
