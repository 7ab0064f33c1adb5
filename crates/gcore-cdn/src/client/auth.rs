//! Bearer token lifecycle

use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use super::Client;
use crate::error::Result;
use crate::time::GcoreTime;

/// Path of the login endpoint.
pub const LOGIN_PATH: &str = "/auth/signin";

/// Account credentials for [`Client::authenticate`].
#[derive(Clone, Serialize)]
pub struct AuthOptions {
    pub username: String,
    pub password: String,
}

impl AuthOptions {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for AuthOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthOptions")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Bearer token issued by the API.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "token")]
    pub value: String,
    #[serde(default)]
    pub expire: Option<GcoreTime>,
}

impl Token {
    pub fn new(value: impl Into<String>, expire: Option<GcoreTime>) -> Self {
        Self {
            value: value.into(),
            expire,
        }
    }

    /// Whether the token must be renewed at `now`.
    ///
    /// A token without expiry, or with the zero expiry, counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire.is_none_or(|expire| expire.before(now))
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("value", &"<redacted>")
            .field("expire", &self.expire)
            .finish()
    }
}

impl Client {
    /// Obtain a token, unless the held one is still valid.
    ///
    /// Concurrent calls are serialized: only one refresh writes the token at
    /// a time. On failure the held token is left untouched.
    pub async fn authenticate(&self, opts: &AuthOptions) -> Result<()> {
        self.scoped(self.refresh_token(opts)).await
    }

    async fn refresh_token(&self, opts: &AuthOptions) -> Result<()> {
        let request = self.new_request(Method::POST, LOGIN_PATH, Some(opts))?;

        let _guard = self.inner.refresh_lock.lock().await;

        let held = self.inner.token.read().clone();
        if held.as_ref().is_some_and(|token| !token.is_expired()) {
            trace!("Held token is still valid");
            return Ok(());
        }

        debug!(username = %opts.username, "Requesting new API token");
        let token = self.send::<Token>(request).await?.into_inner();
        debug!(expire = ?token.expire, "API token renewed");

        *self.inner.token.write() = Some(Arc::new(token));
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_token_decodes_wire_shape() {
        let token: Token =
            serde_json::from_str(r#"{"token": "abc", "expire": "2017-04-17T01:28:15.000Z"}"#).unwrap();
        assert_eq!(token.value, "abc");
        assert_eq!(token.expire.unwrap().to_string(), "2017-04-17T01:28:15");
    }

    #[test]
    fn test_null_or_missing_expire_is_expired() {
        let token: Token = serde_json::from_str(r#"{"token": "abc", "expire": null}"#).unwrap();
        assert!(token.expire.is_none());
        assert!(token.is_expired());

        let token: Token = serde_json::from_str(r#"{"token": "abc"}"#).unwrap();
        assert!(token.is_expired());

        assert!(Token::new("abc", Some(GcoreTime::zero())).is_expired());
    }

    #[test]
    fn test_expiry_is_strict() {
        let now = Utc::now();
        let token = Token::new("abc", Some(GcoreTime::new(now)));
        assert!(!token.is_expired_at(now));
        assert!(token.is_expired_at(now + Duration::seconds(1)));
        assert!(!token.is_expired_at(now - Duration::seconds(1)));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = Token::new("super-secret", None);
        assert!(!format!("{token:?}").contains("super-secret"));

        let opts = AuthOptions::new("user", "hunter2");
        let debug = format!("{opts:?}");
        assert!(debug.contains("user"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_auth_options_wire_shape() {
        let json = serde_json::to_value(AuthOptions::new("u", "p")).unwrap();
        assert_eq!(json, serde_json::json!({"username": "u", "password": "p"}));
    }
}
