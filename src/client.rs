//! Composition root: one gateway, one token provider, one session manager.

use std::sync::Arc;

use tracing::info;

use crate::api::{ApiError, ApiGateway, TokenProvider};
use crate::config::{AuthMode, ClientConfig};
use crate::services::{AdminService, AuthService, QuizService};
use crate::session::{LocalSessionStore, RemoteSessionStore, SessionManager, SessionStore};
use crate::storage::{FileStore, KeyValueStore};

#[derive(Debug)]
pub struct QuizClient {
    gateway: ApiGateway,
    session: SessionManager,
}

impl QuizClient {
    /// Wire the client from config, persisting tokens to `config.storage_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&config.storage_path));
        Self::with_storage(config, storage)
    }

    /// Same as [`QuizClient::from_config`] with caller-supplied storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_storage(config: &ClientConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self, ApiError> {
        let tokens = TokenProvider::new();
        let gateway = ApiGateway::from_config(config, tokens.clone())?;

        let store: Box<dyn SessionStore> = match config.auth_mode {
            AuthMode::Live => Box::new(RemoteSessionStore::new(AuthService::new(gateway.clone()), storage, tokens)),
            AuthMode::Local => Box::new(LocalSessionStore::new()),
        };
        info!(base_url = gateway.base_url(), auth_mode = ?config.auth_mode, "quiz client ready");

        Ok(Self { gateway, session: SessionManager::new(store) })
    }

    #[must_use]
    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    #[must_use]
    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    #[must_use]
    pub fn quizzes(&self) -> QuizService {
        QuizService::new(self.gateway.clone())
    }

    #[must_use]
    pub fn admin(&self) -> AdminService {
        AdminService::new(self.gateway.clone())
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
