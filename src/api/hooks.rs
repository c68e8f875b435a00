//! Request/response instrumentation points for the gateway.
//!
//! Hooks observe traffic. They can decorate an outgoing request, but they
//! never swallow or replace an error: the gateway hands the caller exactly
//! the error it passed to `on_error`.

use reqwest::{Method, RequestBuilder};
use tracing::error;

use super::error::ApiError;

pub trait GatewayHooks: Send + Sync {
    /// Called with every outgoing request after the gateway has attached
    /// its own headers and body.
    fn before_request(&self, _method: &Method, _path: &str, request: RequestBuilder) -> RequestBuilder {
        request
    }

    /// Called once per failed call, before the error is returned.
    fn on_error(&self, _method: &Method, _path: &str, _error: &ApiError) {}
}

/// Default hook: structured diagnostics for every failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingHooks;

impl GatewayHooks for LoggingHooks {
    fn on_error(&self, method: &Method, path: &str, err: &ApiError) {
        match err {
            ApiError::Server { status, body } => {
                error!(%method, path, status, body = %body, "API error");
            }
            ApiError::NoResponse(cause) => {
                error!(%method, path, error = %cause, "network error");
            }
            other => {
                error!(%method, path, error = %other, "request error");
            }
        }
    }
}

#[cfg(test)]
#[path = "hooks_test.rs"]
mod tests;
