//! Admin endpoints: user management, quiz authoring, dashboard stats.
//!
//! The backend enforces the admin role; these calls carry no client-side
//! authorization check.

use serde::{Deserialize, Serialize};

use super::auth::Role;
use super::quiz::{Difficulty, Question, Quiz};
use crate::api::{ApiError, ApiGateway};

/// Account record as listed in the admin console.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUser {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

/// Partial quiz update; absent fields are left untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuizUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateQuestionRequest {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_answer: u32,
    pub points: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub total_quizzes: u64,
    pub total_attempts: u64,
    pub active_users_today: u64,
}

#[derive(Serialize)]
struct UserStatusUpdate {
    is_active: bool,
}

#[derive(Debug, Clone)]
pub struct AdminService {
    gateway: ApiGateway,
}

impl AdminService {
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/admin/users`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn list_users(&self) -> Result<Vec<AccountUser>, ApiError> {
        self.gateway.get("/api/admin/users").await
    }

    /// `PATCH /api/admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<AccountUser, ApiError> {
        self.gateway
            .patch(&format!("/api/admin/users/{user_id}"), &UserStatusUpdate { is_active })
            .await
    }

    /// `DELETE /api/admin/users/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn delete_user(&self, user_id: &str) -> Result<(), ApiError> {
        self.delete_resource(&format!("/api/admin/users/{user_id}")).await
    }

    /// `POST /api/admin/quizzes`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn create_quiz(&self, quiz: &CreateQuizRequest) -> Result<Quiz, ApiError> {
        self.gateway.post("/api/admin/quizzes", quiz).await
    }

    /// `PUT /api/admin/quizzes/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn update_quiz(&self, quiz_id: &str, update: &QuizUpdate) -> Result<Quiz, ApiError> {
        self.gateway.put(&format!("/api/admin/quizzes/{quiz_id}"), update).await
    }

    /// `DELETE /api/admin/quizzes/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn delete_quiz(&self, quiz_id: &str) -> Result<(), ApiError> {
        self.delete_resource(&format!("/api/admin/quizzes/{quiz_id}")).await
    }

    /// `POST /api/admin/quizzes/{id}/questions`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn add_question(&self, quiz_id: &str, question: &CreateQuestionRequest) -> Result<Question, ApiError> {
        self.gateway
            .post(&format!("/api/admin/quizzes/{quiz_id}/questions"), question)
            .await
    }

    /// `PUT /api/admin/questions/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn update_question(&self, question_id: &str, update: &QuestionUpdate) -> Result<Question, ApiError> {
        self.gateway
            .put(&format!("/api/admin/questions/{question_id}"), update)
            .await
    }

    /// `DELETE /api/admin/questions/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn delete_question(&self, question_id: &str) -> Result<(), ApiError> {
        self.delete_resource(&format!("/api/admin/questions/{question_id}")).await
    }

    /// `GET /api/admin/stats`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn stats(&self) -> Result<AdminStats, ApiError> {
        self.gateway.get("/api/admin/stats").await
    }

    // Delete endpoints may answer 204 or echo the removed record; either is success.
    async fn delete_resource(&self, path: &str) -> Result<(), ApiError> {
        let _: Option<serde_json::Value> = self.gateway.delete(path).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "admin_test.rs"]
mod tests;
