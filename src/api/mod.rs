//! API gateway: the single point of HTTP egress to the quiz backend.
//!
//! DESIGN
//! ======
//! Thin wrapper over a `reqwest::Client` with a fixed timeout. Verb helpers
//! return the decoded JSON body directly. The bearer token is read from a
//! [`TokenProvider`] when each request is built rather than mutated into a
//! shared default-header map, so there is no ordering dependency between
//! "attach token" and "next request".
//!
//! ERROR HANDLING
//! ==============
//! Every failure is passed to each installed hook (the default hook logs it)
//! and then returned to the caller unchanged. There is no retry.

pub mod error;
pub mod hooks;
pub mod token;

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub use error::ApiError;
pub use hooks::{GatewayHooks, LoggingHooks};
pub use token::TokenProvider;

use crate::config::ClientConfig;

// =============================================================================
// GATEWAY
// =============================================================================

#[derive(Clone)]
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    tokens: TokenProvider,
    hooks: Vec<Arc<dyn GatewayHooks>>,
}

impl ApiGateway {
    /// Build a gateway for `base_url` with the default logging hook installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration, tokens: TokenProvider) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
            hooks: vec![Arc::new(LoggingHooks)],
        })
    }

    /// Build a gateway from resolved client config.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig, tokens: TokenProvider) -> Result<Self, ApiError> {
        Self::new(config.base_url(), Duration::from_secs(config.timeout_secs), tokens)
    }

    /// Install an additional hook. Hooks run in installation order.
    #[must_use]
    pub fn with_hook(mut self, hook: Arc<dyn GatewayHooks>) -> Self {
        self.hooks.push(hook);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::GET, path, None).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(Method::POST, path, Some(body)).await
    }

    /// POST without a request body.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::POST, path, None).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(Method::PUT, path, Some(body)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = encode_body(body)?;
        self.request(Method::PATCH, path, Some(body)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status, or an undecodable body.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.request(Method::DELETE, path, None).await
    }

    async fn request<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        let result = self.execute(&method, path, body).await;
        if let Err(err) = &result {
            for hook in &self.hooks {
                hook.on_error(&method, path, err);
            }
        }
        result
    }

    async fn execute<T: DeserializeOwned>(&self, method: &Method, path: &str, body: Option<Value>) -> Result<T, ApiError> {
        let url = join_url(&self.base_url, path);
        let mut request = self.http.request(method.clone(), &url);

        if let Some(bearer) = self.tokens.bearer() {
            request = request.header(AUTHORIZATION, bearer);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }
        for hook in &self.hooks {
            request = hook.before_request(method, path, request);
        }

        let response = request.send().await.map_err(|e| ApiError::from_send(&e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::NoResponse(e.to_string()))?;

        if !status.is_success() {
            return Err(ApiError::Server { status: status.as_u16(), body: parse_error_body(&text) });
        }

        decode_body(&text)
    }
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("base_url", &self.base_url)
            .field("tokens", &self.tokens)
            .field("hooks", &self.hooks.len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// BODY HANDLING
// =============================================================================

fn join_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}/{path}")
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::RequestConstruction(e.to_string()))
}

/// Decode a 2xx body. An empty body decodes as JSON `null`, which lets
/// `()` and `Option<_>` targets accept bodiless responses.
fn decode_body<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let value = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))?
    };
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Error bodies are kept as JSON when possible, else as a raw string.
fn parse_error_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
