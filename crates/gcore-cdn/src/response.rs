//! Responses returned by the dispatcher
//!
//! The body is read into memory once during classification and kept here so
//! callers can still inspect the raw bytes after the typed value was decoded,
//! or after the call failed.

use bytes::Bytes;
use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::ops::Deref;
use url::Url;

/// Status, headers and fully buffered body of an HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    url: Url,
    body: Bytes,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, url: Url, body: Bytes) -> Self {
        Self {
            status,
            headers,
            url,
            body,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Final URL of the response, after redirects.
    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as UTF-8 text, lossy.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// A decoded value together with the response it was decoded from.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    value: T,
    raw: RawResponse,
}

impl<T> ApiResponse<T> {
    pub fn new(value: T, raw: RawResponse) -> Self {
        Self { value, raw }
    }

    pub fn status(&self) -> StatusCode {
        self.raw.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.raw.headers()
    }

    pub fn raw(&self) -> &RawResponse {
        &self.raw
    }

    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, RawResponse) {
        (self.value, self.raw)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            value: f(self.value),
            raw: self.raw,
        }
    }
}

impl<T> Deref for ApiResponse<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}
