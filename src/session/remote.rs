//! Backend-backed session strategy.
//!
//! The bearer token is the only durable artifact. It is written to storage
//! first and attached to the [`TokenProvider`] second, so a token the
//! gateway sends is always one that survives a restart.

use std::sync::Arc;

use tracing::warn;

use super::{Role, SessionError, SessionStore, User};
use crate::api::{ApiError, TokenProvider};
use crate::services::auth::{AuthResponse, AuthService, LoginRequest, SignupRequest};
use crate::storage::{AUTH_TOKEN_KEY, KeyValueStore};

const LOGIN_FAILED: &str = "Login failed";
const SIGNUP_FAILED: &str = "Signup failed";
const REFRESH_FAILED: &str = "Session refresh failed";

pub struct RemoteSessionStore {
    auth: AuthService,
    storage: Arc<dyn KeyValueStore>,
    tokens: TokenProvider,
}

impl RemoteSessionStore {
    /// `tokens` must be the provider the `auth` service's gateway reads from.
    #[must_use]
    pub fn new(auth: AuthService, storage: Arc<dyn KeyValueStore>, tokens: TokenProvider) -> Self {
        Self { auth, storage, tokens }
    }

    async fn persist_token(&self, token: String) -> Result<(), SessionError> {
        self.storage.set_item(AUTH_TOKEN_KEY, &token).await?;
        self.tokens.set(token);
        Ok(())
    }

    async fn establish(&self, response: AuthResponse) -> Result<User, SessionError> {
        self.persist_token(response.access_token).await?;
        Ok(response.user.into())
    }

    async fn discard_token(&self) {
        self.tokens.clear();
        if let Err(e) = self.storage.remove_item(AUTH_TOKEN_KEY).await {
            warn!(error = %e, "could not delete persisted token");
        }
    }
}

/// Prefer the backend's `detail` message; fall back to a generic one.
fn authentication_failure(err: &ApiError, fallback: &str) -> SessionError {
    SessionError::AuthenticationFailure(err.detail().unwrap_or(fallback).to_string())
}

#[async_trait::async_trait]
impl SessionStore for RemoteSessionStore {
    async fn restore(&self) -> Option<User> {
        let token = match self.storage.get_item(AUTH_TOKEN_KEY).await {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "could not read persisted token, discarding it");
                self.discard_token().await;
                return None;
            }
        };

        self.tokens.set(token);
        match self.auth.me().await {
            Ok(profile) => Some(profile.into()),
            Err(e) => {
                warn!(error = %e, "persisted session rejected, discarding token");
                self.discard_token().await;
                None
            }
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let response = self
            .auth
            .login(&LoginRequest { email, password })
            .await
            .map_err(|e| authentication_failure(&e, LOGIN_FAILED))?;
        self.establish(response).await
    }

    async fn signup(&self, email: &str, password: &str, role: Option<Role>) -> Result<User, SessionError> {
        let request = SignupRequest { email, password, role: role.unwrap_or_default() };
        let response = self
            .auth
            .signup(&request)
            .await
            .map_err(|e| authentication_failure(&e, SIGNUP_FAILED))?;
        self.establish(response).await
    }

    async fn logout(&self) {
        // Notify while the token is still attached.
        if let Err(e) = self.auth.logout().await {
            warn!(error = %e, "logout notification failed; clearing local session anyway");
        }
        self.discard_token().await;
    }

    async fn refresh(&self) -> Result<(), SessionError> {
        let refreshed = self
            .auth
            .refresh()
            .await
            .map_err(|e| authentication_failure(&e, REFRESH_FAILED))?;
        self.persist_token(refreshed.access_token).await
    }
}

impl std::fmt::Debug for RemoteSessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteSessionStore")
            .field("auth", &self.auth)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}
