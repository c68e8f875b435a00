//! Auth endpoints: login, signup, logout, profile, token refresh.

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiGateway};

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Admin => f.write_str("admin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            other => Err(format!("unknown role '{other}' (expected 'user' or 'admin')")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct SignupRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
}

/// Profile as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub user: AuthUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RefreshedToken {
    pub access_token: String,
}

// =============================================================================
// SERVICE
// =============================================================================

#[derive(Debug, Clone)]
pub struct AuthService {
    gateway: ApiGateway,
}

impl AuthService {
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// `POST /api/auth/login`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn login(&self, credentials: &LoginRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.gateway.post("/api/auth/login", credentials).await
    }

    /// `POST /api/auth/signup`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn signup(&self, data: &SignupRequest<'_>) -> Result<AuthResponse, ApiError> {
        self.gateway.post("/api/auth/signup", data).await
    }

    /// `POST /api/auth/logout`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self.gateway.post_empty("/api/auth/logout").await?;
        Ok(())
    }

    /// `GET /api/auth/me`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn me(&self) -> Result<AuthUser, ApiError> {
        self.gateway.get("/api/auth/me").await
    }

    /// `POST /api/auth/refresh`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn refresh(&self) -> Result<RefreshedToken, ApiError> {
        self.gateway.post_empty("/api/auth/refresh").await
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
