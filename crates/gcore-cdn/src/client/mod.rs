//! # Dispatch core
//!
//! [`Client`] owns the transport, the configuration and the bearer token.
//! Every API call goes through the same two steps:
//!
//! 1. [`Client::new_request`] resolves a relative path against the base URL,
//!    encodes an optional JSON body and attaches the standard headers plus the
//!    current token.
//! 2. [`Client::execute`] sends it once, buffers the body and classifies the
//!    status code. [`Client::send`] additionally decodes the body into a typed
//!    value, [`Client::send_empty`] does not.
//!
//! ```text
//! service method ──> new_request ──> execute ──> classify ──> decode
//!                       │                          │
//!                   token (read)              ApiError / Decode
//! ```
//!
//! Calls are plain `async fn`s. Dropping the future cancels the in-flight
//! request; a per-call deadline can be set on the built request with
//! [`reqwest::Request::timeout_mut`], and [`ClientConfig::request_timeout`]
//! always applies as an upper bound.
//!
//! ## Example
//!
//! ```rust,no_run
//! use gcore_cdn::{AuthOptions, Client, ClientConfig, NO_BODY};
//! use reqwest::Method;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new(ClientConfig::default())?;
//!     client
//!         .authenticate(&AuthOptions::new("user@example.com", "secret"))
//!         .await?;
//!
//!     let request = client.new_request(Method::GET, "/clients/me", NO_BODY)?;
//!     let account = client.send::<serde_json::Value>(request).await?;
//!     println!("{} -> {}", account.status(), *account);
//!     Ok(())
//! }
//! ```

mod auth;
mod variants;

pub use auth::{AuthOptions, LOGIN_PATH, Token};
pub use variants::{CommonClient, ResellerClient};

use parking_lot::RwLock;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderValue, USER_AGENT};
use reqwest::{Body, Method, Request};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::future::Future;
use std::sync::Arc;
use tracing::instrument::WithSubscriber;
use tracing::{debug, error};

use crate::config::ClientConfig;
use crate::error::{ApiError, Error, Result, is_failure_status};
use crate::response::{ApiResponse, RawResponse};
use crate::transport::build_http_client;

/// `None` body for [`Client::new_request`] and [`Client::call`].
pub const NO_BODY: Option<&()> = None;

const APPLICATION_JSON: &str = "application/json";

/// Handle to the G-Core API.
///
/// Cheap to clone; clones share the transport and the bearer token.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: ClientConfig,
    user_agent: HeaderValue,
    token: RwLock<Option<Arc<Token>>>,
    // Held for the whole check-and-refresh sequence in `authenticate`
    refresh_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("user_agent", &self.inner.config.user_agent)
            .field("authenticated", &self.inner.token.read().is_some())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client with a transport built from `config`
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = build_http_client(&config)?;
        Self::with_http_client(config, http)
    }

    /// Create a client on top of a caller-provided `reqwest` client
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        let user_agent = HeaderValue::from_str(&config.user_agent)?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                config,
                user_agent,
                token: RwLock::new(None),
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        })
    }

    /// New client with the same configuration and transport but its own token.
    pub(crate) fn fork_with_token(&self, token: Token) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                http: self.inner.http.clone(),
                config: self.inner.config.clone(),
                user_agent: self.inner.user_agent.clone(),
                token: RwLock::new(Some(Arc::new(token))),
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn base_url(&self) -> &url::Url {
        &self.inner.config.base_url
    }

    /// Underlying transport
    pub fn http_client(&self) -> &reqwest::Client {
        &self.inner.http
    }

    /// Currently held bearer token
    pub fn token(&self) -> Option<Arc<Token>> {
        self.inner.token.read().clone()
    }

    /// Install a token obtained elsewhere, replacing the held one
    pub fn set_token(&self, token: Token) {
        *self.inner.token.write() = Some(Arc::new(token));
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.token.read().is_some()
    }

    /// Build a request for `path`, relative to the base URL.
    ///
    /// The `Authorization` header is attached only when a token is held;
    /// without one the request is still built. The configured request
    /// timeout is set on the request and may be narrowed before sending.
    pub fn new_request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = self
            .inner
            .config
            .base_url
            .join(path)
            .map_err(|e| Error::invalid_path(path, e))?;

        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(Error::Serialize)?;

        let mut request = Request::new(method, url);
        *request.timeout_mut() = Some(self.inner.config.request_timeout);
        if let Some(payload) = payload {
            *request.body_mut() = Some(Body::from(payload));
        }

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(USER_AGENT, self.inner.user_agent.clone());

        if let Some(token) = self.token() {
            let mut value = HeaderValue::from_str(&format!("Token {}", token.value))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(request)
    }

    /// Send `request` and classify the response.
    ///
    /// A status in `[400, 511]` becomes [`Error::Api`]. Any other status is
    /// returned as-is with the body buffered.
    pub async fn execute(&self, request: Request) -> Result<RawResponse> {
        self.scoped(self.dispatch(request)).await
    }

    /// Send `request` and decode a successful body into `T`
    pub async fn send<T: DeserializeOwned>(&self, request: Request) -> Result<ApiResponse<T>> {
        let raw = self.execute(request).await?;
        match serde_json::from_slice::<T>(raw.body()) {
            Ok(value) => Ok(ApiResponse::new(value, raw)),
            Err(source) => Err(Error::Decode {
                source,
                response: Box::new(raw),
            }),
        }
    }

    /// Send `request`, ignoring any successful body
    pub async fn send_empty(&self, request: Request) -> Result<ApiResponse<()>> {
        let raw = self.execute(request).await?;
        Ok(ApiResponse::new((), raw))
    }

    /// Build, send and decode in one step
    pub async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiResponse<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.new_request(method, path, body)?;
        self.send(request).await
    }

    /// Build and send, ignoring any successful body
    pub async fn call_empty<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<ApiResponse<()>>
    where
        B: Serialize + ?Sized,
    {
        let request = self.new_request(method, path, body)?;
        self.send_empty(request).await
    }

    async fn dispatch(&self, request: Request) -> Result<RawResponse> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "REQ");

        let response = match self.inner.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(%method, %url, "Request failed with error: {e}");
                return Err(Error::Transport(e));
            }
        };

        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "RESP");

        let headers = response.headers().clone();
        let final_url = response.url().clone();
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                error!(%method, %url, "Reading response body failed: {e}");
                return Err(Error::Transport(e));
            }
        };
        let raw = RawResponse::new(status, headers, final_url, body);

        if is_failure_status(status) {
            debug!(status = status.as_u16(), body = %raw.text(), "RESP BODY");
            let error = ApiError::from_body(status.as_u16(), raw.body());
            return Err(Error::Api {
                error,
                response: Box::new(raw),
            });
        }

        Ok(raw)
    }

    /// Run `fut` with the configured logger as default subscriber, if any.
    async fn scoped<F: Future>(&self, fut: F) -> F::Output {
        match &self.inner.config.logger {
            Some(dispatch) => fut.with_subscriber(dispatch.clone()).await,
            None => fut.await,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
        name: String,
    }

    fn client_for(uri: &str) -> Client {
        let config = ClientConfig::with_base_url(uri).expect("valid mock URI");
        Client::new(config).expect("client builds")
    }

    #[test]
    fn test_path_replaces_base_path() {
        let config = ClientConfig::with_base_url("https://api.example.com/v1/").unwrap();
        let client = Client::new(config).unwrap();

        let req = client.new_request(Method::GET, "/resources/42", NO_BODY).unwrap();
        assert_eq!(req.url().as_str(), "https://api.example.com/resources/42");

        let req = client.new_request(Method::GET, "resources", NO_BODY).unwrap();
        assert_eq!(req.url().as_str(), "https://api.example.com/v1/resources");
    }

    #[test]
    fn test_standard_headers() {
        let client = client_for("http://localhost:1");
        let req = client.new_request(Method::GET, "/clients/me", NO_BODY).unwrap();

        assert_eq!(req.headers()[CONTENT_TYPE], "application/json");
        assert_eq!(req.headers()[ACCEPT], "application/json");
        assert!(req.headers()[USER_AGENT].to_str().unwrap().starts_with("gcore-cdn/"));
        assert!(req.headers().get(AUTHORIZATION).is_none());
        assert!(req.body().is_none());
        assert_eq!(req.timeout(), Some(&std::time::Duration::from_secs(60)));
    }

    #[test]
    fn test_token_header_attached() {
        let client = client_for("http://localhost:1");
        client.set_token(Token::new("abc", None));
        let req = client.new_request(Method::GET, "/clients/me", NO_BODY).unwrap();
        assert_eq!(req.headers()[AUTHORIZATION], "Token abc");
    }

    #[test]
    fn test_json_body_encoded() {
        let client = client_for("http://localhost:1");
        let body = serde_json::json!({"paths": ["/a.png"]});
        let req = client.new_request(Method::POST, "/resources/1/purge", Some(&body)).unwrap();
        let bytes = req.body().and_then(Body::as_bytes).unwrap();
        assert_eq!(bytes, br#"{"paths":["/a.png"]}"#);
    }

    #[test]
    fn test_invalid_token_is_construction_error() {
        let client = client_for("http://localhost:1");
        client.set_token(Token::new("bad\nvalue", None));
        let err = client.new_request(Method::GET, "/clients/me", NO_BODY).unwrap_err();
        assert!(matches!(err, Error::InvalidHeader(_)));
    }

    #[test]
    fn test_unserializable_body() {
        use std::collections::HashMap;
        let client = client_for("http://localhost:1");
        let mut body = HashMap::new();
        body.insert((1, 2), "tuple keys are not valid JSON object keys");
        let err = client.new_request(Method::POST, "/x", Some(&body)).unwrap_err();
        assert!(matches!(err, Error::Serialize(_)));
    }

    #[test]
    fn test_custom_user_agent() {
        let config = ClientConfig {
            user_agent: "my-tool/1.0".to_string(),
            ..ClientConfig::default()
        };
        let client = Client::new(config).unwrap();
        let req = client.new_request(Method::GET, "/clients/me", NO_BODY).unwrap();
        assert_eq!(req.headers()[USER_AGENT], "my-tool/1.0");
    }

    #[tokio::test]
    async fn test_send_decodes_success() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/42"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 42, "name": "x"}"#))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let item = client
            .call::<(), Item>(Method::GET, "/items/42", None)
            .await
            .expect("request should succeed");

        assert_eq!(item.status(), 200);
        assert_eq!(*item, Item { id: 42, name: "x".to_string() });
        assert_eq!(item.raw().body().as_ref(), br#"{"id": 42, "name": "x"}"#);
    }

    #[tokio::test]
    async fn test_post_sends_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/items"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "x"})))
            .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id": 1, "name": "x"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let body = serde_json::json!({"name": "x"});
        let item: ApiResponse<Item> = client
            .call(Method::POST, "/items", Some(&body))
            .await
            .expect("request should succeed");
        assert_eq!(item.id, 1);
    }

    #[tokio::test]
    async fn test_decode_error_is_distinct() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .call::<(), Item>(Method::GET, "/items/1", None)
            .await
            .expect_err("body is not JSON");

        assert!(err.is_decode());
        assert!(!err.is_api());
        assert_eq!(err.status(), Some(reqwest::StatusCode::OK));
        assert_eq!(err.response().map(RawResponse::text).as_deref(), Some("not json"));
    }

    #[tokio::test]
    async fn test_send_empty_ignores_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/items/1"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let resp = client
            .call_empty(Method::DELETE, "/items/1", NO_BODY)
            .await
            .expect("request should succeed");
        assert_eq!(resp.status(), 204);
        assert!(resp.raw().body().is_empty());
    }

    #[tokio::test]
    async fn test_transport_error() {
        // Nothing listens on port 1
        let client = client_for("http://127.0.0.1:1");
        let err = client
            .call_empty(Method::GET, "/clients/me", NO_BODY)
            .await
            .expect_err("connection should be refused");
        assert!(err.is_transport());
        assert!(err.response().is_none());
    }

    #[tokio::test]
    async fn test_logger_receives_events() {
        use std::io::Write;
        use std::sync::Mutex;

        #[derive(Clone, Default)]
        struct Capture(Arc<Mutex<Vec<u8>>>);

        impl Write for Capture {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }
            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/items/7"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id": 7, "name": "y"}"#))
            .mount(&mock_server)
            .await;

        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let config = ClientConfig::with_base_url(&mock_server.uri())
            .unwrap()
            .with_logger(tracing::Dispatch::new(subscriber));
        let client = Client::new(config).unwrap();
        client
            .call::<(), Item>(Method::GET, "/items/7", None)
            .await
            .unwrap();

        let logged = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("REQ"));
        assert!(logged.contains("RESP"));
        assert!(logged.contains("/items/7"));
    }
}
