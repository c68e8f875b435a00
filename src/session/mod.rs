//! Session lifecycle: who is logged in, and how that changes.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` is the single source of truth for the current user. It
//! delegates identity work to a [`SessionStore`] chosen once at wiring time:
//! [`RemoteSessionStore`] talks to the backend and persists the bearer token,
//! [`LocalSessionStore`] synthesizes users from input with no I/O at all.
//!
//! Every state change is published on a `watch` channel so a presentation
//! layer can re-render from `subscribe()` instead of polling.
//!
//! ERROR HANDLING
//! ==============
//! Only `login`, `signup` and `refresh` return errors, and only as a
//! user-facing message. `initialize` and `logout` absorb failures and always
//! leave the session in a terminal, consistent state.

pub mod local;
pub mod remote;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::info;

pub use crate::services::auth::Role;
pub use local::LocalSessionStore;
pub use remote::RemoteSessionStore;

use crate::services::auth::AuthUser;
use crate::storage::StorageError;

// =============================================================================
// TYPES
// =============================================================================

/// The current user. Replaced wholesale on every login; never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<String>,
    pub email: String,
    pub role: Option<Role>,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(Role::Admin)
    }
}

impl From<AuthUser> for User {
    fn from(user: AuthUser) -> Self {
        Self { id: Some(user.id), email: user.email, role: Some(user.role) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
    /// True only while startup restoration is running.
    pub is_loading: bool,
}

impl Session {
    /// State at process start, before restoration has run.
    #[must_use]
    pub fn starting() -> Self {
        Self { user: None, is_loading: true }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::starting()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Login, signup or refresh was rejected. Carries the message to show.
    #[error("{0}")]
    AuthenticationFailure(String),

    /// The issued token could not be persisted.
    #[error("could not persist session: {0}")]
    Storage(#[from] StorageError),
}

// =============================================================================
// STORE STRATEGY
// =============================================================================

/// Identity strategy behind a [`SessionManager`].
#[async_trait::async_trait]
pub trait SessionStore: Send + Sync {
    /// Recover the user from durable state, if any. Never fails: anything
    /// that goes wrong yields `None`.
    async fn restore(&self) -> Option<User>;

    async fn login(&self, email: &str, password: &str) -> Result<User, SessionError>;

    /// `role` of `None` requests the default role.
    async fn signup(&self, email: &str, password: &str, role: Option<Role>) -> Result<User, SessionError>;

    /// Tear down credentials. Best effort; never fails.
    async fn logout(&self);

    /// Exchange the current credential for a fresh one.
    async fn refresh(&self) -> Result<(), SessionError>;
}

// =============================================================================
// MANAGER
// =============================================================================

pub struct SessionManager {
    store: Box<dyn SessionStore>,
    state: watch::Sender<Session>,
}

impl SessionManager {
    #[must_use]
    pub fn new(store: Box<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(Session::starting());
        Self { store, state }
    }

    /// Restore a persisted session. Always ends with `is_loading == false`.
    pub async fn initialize(&self) {
        let user = self.store.restore().await;
        if let Some(user) = &user {
            info!(email = %user.email, "session restored");
        }
        self.state.send_modify(|session| {
            session.user = user;
            session.is_loading = false;
        });
    }

    /// # Errors
    ///
    /// Returns [`SessionError::AuthenticationFailure`] with a displayable
    /// message when the backend rejects the credentials. The session is not
    /// modified on failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, SessionError> {
        let user = self.store.login(email, password).await?;
        info!(email = %user.email, role = ?user.role, "logged in");
        self.replace_user(Some(user.clone()));
        Ok(user)
    }

    /// # Errors
    ///
    /// Same contract as [`SessionManager::login`].
    pub async fn signup(&self, email: &str, password: &str, role: Option<Role>) -> Result<User, SessionError> {
        let user = self.store.signup(email, password, role).await?;
        info!(email = %user.email, role = ?user.role, "signed up");
        self.replace_user(Some(user.clone()));
        Ok(user)
    }

    /// Clears the session regardless of what the backend says.
    pub async fn logout(&self) {
        self.store.logout().await;
        self.replace_user(None);
        info!("logged out");
    }

    /// # Errors
    ///
    /// Returns [`SessionError::AuthenticationFailure`] when the backend
    /// refuses to refresh. The current user is left in place.
    pub async fn refresh(&self) -> Result<(), SessionError> {
        self.store.refresh().await
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.state.borrow().user.as_ref().is_some_and(User::is_admin)
    }

    /// Receiver that observes every session change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    fn replace_user(&self, user: Option<User>) {
        self.state.send_modify(|session| session.user = user);
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager").field("session", &*self.state.borrow()).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
