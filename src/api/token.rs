//! Bearer token holder shared between the session layer and the gateway.
//!
//! The gateway reads the current token when each request is built, so a
//! `set`/`clear` that returns is visible to every request issued after it.

use std::sync::{Arc, PoisonError, RwLock};

#[derive(Clone, Default)]
pub struct TokenProvider {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// `Authorization` header value for the current token.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider").field("present", &self.token().is_some()).finish()
    }
}

#[cfg(test)]
#[path = "token_test.rs"]
mod tests;
