//! Transport error taxonomy for the gateway.

use serde_json::Value;

/// Errors produced by [`ApiGateway`](super::ApiGateway) calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The backend responded with a non-2xx status.
    #[error("server responded with status {status}")]
    Server { status: u16, body: Value },

    /// The request was sent but no response arrived (timeout or connectivity loss).
    #[error("no response from server: {0}")]
    NoResponse(String),

    /// The request could not be built or sent at all.
    #[error("request construction failed: {0}")]
    RequestConstruction(String),

    /// A 2xx body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),
}

impl ApiError {
    /// Upstream status code, when the server responded.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Backend-supplied `{"detail": "..."}` message, when present.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Server { body, .. } => body.get("detail").and_then(Value::as_str),
            _ => None,
        }
    }

    /// Classify a reqwest failure raised before any response was read.
    pub(crate) fn from_send(err: &reqwest::Error) -> Self {
        if err.is_builder() {
            Self::RequestConstruction(err.to_string())
        } else {
            Self::NoResponse(err.to_string())
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
