//! Quiz endpoints: catalog, questions, attempts.

use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ApiGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub difficulty: Difficulty,
    pub questions_count: u32,
    /// Seconds.
    #[serde(default)]
    pub time_limit: Option<u32>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub quiz_id: String,
    pub question_text: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: String,
    pub quiz_id: String,
    pub user_id: String,
    pub score: u32,
    pub total_points: u32,
    pub percentage: f64,
    pub started_at: String,
    pub completed_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitAnswerRequest {
    pub question_id: String,
    pub selected_option: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StartedAttempt {
    pub attempt_id: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AnswerResult {
    pub correct: bool,
}

#[derive(Debug, Clone)]
pub struct QuizService {
    gateway: ApiGateway,
}

impl QuizService {
    #[must_use]
    pub fn new(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    /// `GET /api/quizzes`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, ApiError> {
        self.gateway.get("/api/quizzes").await
    }

    /// `GET /api/quizzes/{id}`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn get_quiz(&self, quiz_id: &str) -> Result<Quiz, ApiError> {
        self.gateway.get(&format!("/api/quizzes/{quiz_id}")).await
    }

    /// `GET /api/quizzes/{id}/questions`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn get_questions(&self, quiz_id: &str) -> Result<Vec<Question>, ApiError> {
        self.gateway.get(&format!("/api/quizzes/{quiz_id}/questions")).await
    }

    /// `POST /api/quizzes/{id}/start`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn start_quiz(&self, quiz_id: &str) -> Result<StartedAttempt, ApiError> {
        self.gateway.post_empty(&format!("/api/quizzes/{quiz_id}/start")).await
    }

    /// `POST /api/quiz-attempts/{attempt_id}/answer`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn submit_answer(&self, attempt_id: &str, answer: &SubmitAnswerRequest) -> Result<AnswerResult, ApiError> {
        self.gateway
            .post(&format!("/api/quiz-attempts/{attempt_id}/answer"), answer)
            .await
    }

    /// `POST /api/quiz-attempts/{attempt_id}/complete`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn complete_quiz(&self, attempt_id: &str) -> Result<QuizAttempt, ApiError> {
        self.gateway
            .post_empty(&format!("/api/quiz-attempts/{attempt_id}/complete"))
            .await
    }

    /// `GET /api/users/me/quiz-attempts`
    ///
    /// # Errors
    ///
    /// Propagates the gateway's [`ApiError`] unchanged.
    pub async fn my_attempts(&self) -> Result<Vec<QuizAttempt>, ApiError> {
        self.gateway.get("/api/users/me/quiz-attempts").await
    }
}

#[cfg(test)]
#[path = "quiz_test.rs"]
mod tests;
