//! Error types for G-Core API operations

use crate::response::RawResponse;
use reqwest::StatusCode;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Lowest status code treated as a failure.
pub const FAILURE_STATUS_MIN: u16 = 400;

/// Highest status code treated as a failure (511 Network Authentication Required).
pub const FAILURE_STATUS_MAX: u16 = 511;

/// Whether a status code falls in the inclusive failure range `[400, 511]`.
///
/// Anything outside of it, including codes above 511 that some gateways
/// emit, goes through the success path.
pub fn is_failure_status(status: StatusCode) -> bool {
    (FAILURE_STATUS_MIN..=FAILURE_STATUS_MAX).contains(&status.as_u16())
}

/// Error reported by the G-Core API for a failure status code.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiError {
    #[serde(skip)]
    code: u16,
    #[serde(default)]
    errors: Option<HashMap<String, Vec<String>>>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Error carrying only the status code.
    pub fn from_status(code: u16) -> Self {
        Self {
            code,
            errors: None,
            message: None,
        }
    }

    /// Build the error for a failed response body.
    ///
    /// A body shaped like `{"errors": {...}, "message": "..."}` yields a
    /// structured error. An empty or unparsable body yields an error with
    /// only the status code.
    pub fn from_body(code: u16, body: &[u8]) -> Self {
        if body.is_empty() {
            return Self::from_status(code);
        }
        match serde_json::from_slice::<Self>(body) {
            Ok(mut parsed) => {
                parsed.code = code;
                parsed
            }
            Err(e) => {
                tracing::trace!("Failure body is not a structured error: {e}");
                Self::from_status(code)
            }
        }
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    /// Field-level validation messages, keyed by field name.
    pub fn errors(&self) -> Option<&HashMap<String, Vec<String>>> {
        self.errors.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// True when neither field errors nor a message were present.
    pub fn is_generic(&self) -> bool {
        self.errors.is_none() && self.message.is_none()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_generic() {
            return write!(f, "got the {} error status code from the server", self.code);
        }
        write!(f, "response code: {}", self.code)?;
        if let Some(errors) = &self.errors {
            let mut fields: Vec<_> = errors.iter().collect();
            fields.sort_by(|a, b| a.0.cmp(b.0));
            write!(f, " error(s): ")?;
            for (i, (field, messages)) in fields.into_iter().enumerate() {
                if i > 0 {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {}", messages.join(", "))?;
            }
        }
        if let Some(message) = &self.message {
            write!(f, " message: {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Error)]
pub enum Error {
    // Construction errors, nothing was sent
    #[error("Invalid request path {path:?}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to encode request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Failed to encode query parameters: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Invalid configuration: {0}")]
    Config(String),

    // No response was received
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // The server rejected the request
    #[error("API error: {error}")]
    Api {
        error: ApiError,
        response: Box<RawResponse>,
    },

    // The server accepted the request but the body is not what we expected
    #[error("Failed to decode response body: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        response: Box<RawResponse>,
    },

    #[error("Client {client_id} has no {name} service")]
    ServiceNotFound { client_id: u64, name: String },
}

impl Error {
    /// Create an invalid path error
    pub fn invalid_path(path: impl Into<String>, source: url::ParseError) -> Self {
        Self::InvalidPath {
            path: path.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config(reason.into())
    }

    /// HTTP status of the response this error came from, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(RawResponse::status)
    }

    /// The response this error came from, body included.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            Self::Api { response, .. } | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The typed API error, if the server answered with a failure status.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if the server rejected the credentials (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
