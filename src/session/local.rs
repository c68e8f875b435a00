//! Offline session strategy. No network, no storage, never fails.

use tracing::debug;

use super::{Role, SessionError, SessionStore, User};

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSessionStore;

impl LocalSessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Placeholder role policy for offline use: `admin` when explicitly
/// requested or when the email contains "admin" (any case), else `user`.
///
/// This is not authorization. Nothing derived from it may gate access to
/// real data.
#[must_use]
pub fn infer_role(email: &str, requested: Option<Role>) -> Role {
    if requested == Some(Role::Admin) || email.to_lowercase().contains("admin") {
        Role::Admin
    } else {
        Role::User
    }
}

fn local_user(email: &str, requested: Option<Role>) -> User {
    User { id: None, email: email.to_string(), role: Some(infer_role(email, requested)) }
}

#[async_trait::async_trait]
impl SessionStore for LocalSessionStore {
    async fn restore(&self) -> Option<User> {
        None
    }

    async fn login(&self, email: &str, _password: &str) -> Result<User, SessionError> {
        let user = local_user(email, None);
        debug!(email, role = ?user.role, "local login");
        Ok(user)
    }

    async fn signup(&self, email: &str, _password: &str, role: Option<Role>) -> Result<User, SessionError> {
        let user = local_user(email, role);
        debug!(email, role = ?user.role, "local signup");
        Ok(user)
    }

    async fn logout(&self) {}

    async fn refresh(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
