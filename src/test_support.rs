//! In-process stub of the quiz backend for tests.
//!
//! Binds an axum router to `127.0.0.1:0` and serves canned responses for the
//! auth, quiz and admin endpoints. Every request that reaches a handler is
//! recorded with its `Authorization` header so tests can assert on token
//! attachment.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::task::JoinHandle;

use crate::api::{ApiGateway, TokenProvider};

pub const GOOD_PASSWORD: &str = "pw";
pub const TAKEN_EMAIL: &str = "taken@x.com";

// =============================================================================
// STATE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Default)]
pub struct StubState {
    /// token -> profile returned by `/api/auth/me`.
    pub profiles: Mutex<HashMap<String, Value>>,
    pub requests: Mutex<Vec<Recorded>>,
    pub fail_logout: Mutex<bool>,
}

impl StubState {
    pub fn add_profile(&self, token: &str, profile: Value) {
        self.profiles.lock().unwrap().insert(token.to_string(), profile);
    }

    pub fn set_fail_logout(&self, fail: bool) {
        *self.fail_logout.lock().unwrap() = fail;
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests().into_iter().filter(|r| r.path == path).collect()
    }

    fn record(&self, method: &str, path: &str, headers: &HeaderMap, body: Value) {
        let authorization = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(ToOwned::to_owned);
        self.requests.lock().unwrap().push(Recorded {
            method: method.into(),
            path: path.into(),
            authorization,
            body,
        });
    }

    fn profile_for(&self, headers: &HeaderMap) -> Option<Value> {
        let bearer = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let token = bearer.strip_prefix("Bearer ")?;
        self.profiles.lock().unwrap().get(token).cloned()
    }
}

type Stub = State<Arc<StubState>>;

// =============================================================================
// SERVER
// =============================================================================

pub struct StubServer {
    pub base_url: String,
    pub state: Arc<StubState>,
    handle: JoinHandle<()>,
}

impl StubServer {
    /// Start the stub backend on an ephemeral port.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = router(state.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind stub");
        let addr = listener.local_addr().expect("stub addr");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });
        Self { base_url: format!("http://{addr}"), state, handle }
    }

    /// Gateway pointed at this stub with a short timeout.
    pub fn gateway(&self, tokens: TokenProvider) -> ApiGateway {
        ApiGateway::new(&self.base_url, Duration::from_millis(500), tokens).expect("gateway")
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL on which nothing is listening.
pub async fn dead_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn token_for(email: &str) -> String {
    format!("tok-{email}")
}

pub fn profile(id: &str, email: &str, role: &str) -> Value {
    json!({ "id": id, "email": email, "role": role })
}

fn router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/", get(boom))
        .route("/slow", get(slow))
        .route("/not-json", get(not_json))
        .route("/echo", post(echo).put(echo).patch(echo))
        .route("/api/auth/login", post(login))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/me", get(me))
        .route("/api/auth/refresh", post(refresh))
        .route("/api/quizzes", get(list_quizzes))
        .route("/api/quizzes/{id}", get(get_quiz))
        .route("/api/quizzes/{id}/questions", get(quiz_questions))
        .route("/api/quizzes/{id}/start", post(start_quiz))
        .route("/api/quiz-attempts/{id}/answer", post(submit_answer))
        .route("/api/quiz-attempts/{id}/complete", post(complete_quiz))
        .route("/api/users/me/quiz-attempts", get(my_attempts))
        .route("/api/admin/users", get(admin_users))
        .route("/api/admin/users/{id}", patch(admin_patch_user).delete(admin_delete))
        .route("/api/admin/quizzes", post(admin_create_quiz))
        .route("/api/admin/quizzes/{id}", put(admin_update_quiz).delete(admin_delete))
        .route("/api/admin/quizzes/{id}/questions", post(admin_add_question))
        .route("/api/admin/questions/{id}", put(admin_update_question).delete(admin_delete))
        .route("/api/admin/stats", get(admin_stats))
        .with_state(state)
}

// =============================================================================
// CANNED DATA
// =============================================================================

pub fn quiz_json(id: &str) -> Value {
    json!({
        "id": id,
        "title": "Rust Basics",
        "description": "Ownership and borrowing",
        "category": "programming",
        "difficulty": "medium",
        "questions_count": 2,
        "time_limit": 300,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

pub fn question_json(id: &str, quiz_id: &str) -> Value {
    json!({
        "id": id,
        "quiz_id": quiz_id,
        "question_text": "What does `&mut` grant?",
        "options": ["shared access", "exclusive access"],
        "correct_answer": 1,
        "points": 10
    })
}

pub fn attempt_json(id: &str) -> Value {
    json!({
        "id": id,
        "quiz_id": "q1",
        "user_id": "u1",
        "score": 10,
        "total_points": 20,
        "percentage": 50.0,
        "started_at": "2025-01-01T00:00:00Z",
        "completed_at": "2025-01-01T00:05:00Z"
    })
}

fn account_json(id: &str, active: bool) -> Value {
    json!({
        "id": id,
        "email": "bob@x.com",
        "role": "user",
        "created_at": "2025-01-01T00:00:00Z",
        "is_active": active
    })
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

fn auth_response(state: &StubState, id: &str, email: &str, role: &str) -> Response {
    let token = token_for(email);
    let user = profile(id, email, role);
    state.add_profile(&token, user.clone());
    Json(json!({ "access_token": token, "token_type": "bearer", "user": user })).into_response()
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn boom() -> Response {
    detail(StatusCode::INTERNAL_SERVER_ERROR, "boom")
}

async fn slow() -> Response {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "ok": true })).into_response()
}

async fn not_json() -> Response {
    (StatusCode::OK, "definitely not json").into_response()
}

async fn echo(State(state): Stub, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("ECHO", "/echo", &headers, body.clone());
    Json(body).into_response()
}

async fn login(State(state): Stub, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST", "/api/auth/login", &headers, body.clone());
    let email = body["email"].as_str().unwrap_or_default();
    if body["password"].as_str() != Some(GOOD_PASSWORD) {
        return detail(StatusCode::UNAUTHORIZED, "Invalid credentials");
    }
    let role = if email.starts_with("admin") { "admin" } else { "user" };
    auth_response(&state, "u1", email, role)
}

async fn signup(State(state): Stub, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST", "/api/auth/signup", &headers, body.clone());
    let email = body["email"].as_str().unwrap_or_default();
    if email == TAKEN_EMAIL {
        return detail(StatusCode::BAD_REQUEST, "Email already registered");
    }
    if email.is_empty() {
        // FastAPI-style validation error: `detail` is not a string.
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "detail": [{ "loc": ["body", "email"], "msg": "field required" }] })),
        )
            .into_response();
    }
    let role = body["role"].as_str().unwrap_or("user").to_string();
    auth_response(&state, "u2", email, &role)
}

async fn logout(State(state): Stub, headers: HeaderMap) -> Response {
    state.record("POST", "/api/auth/logout", &headers, Value::Null);
    if *state.fail_logout.lock().unwrap() {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "logout exploded");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn me(State(state): Stub, headers: HeaderMap) -> Response {
    state.record("GET", "/api/auth/me", &headers, Value::Null);
    match state.profile_for(&headers) {
        Some(profile) => Json(profile).into_response(),
        None => detail(StatusCode::UNAUTHORIZED, "Not authenticated"),
    }
}

async fn refresh(State(state): Stub, headers: HeaderMap) -> Response {
    state.record("POST", "/api/auth/refresh", &headers, Value::Null);
    let Some(profile) = state.profile_for(&headers) else {
        return detail(StatusCode::UNAUTHORIZED, "Token expired");
    };
    let email = profile["email"].as_str().unwrap_or_default();
    let token = format!("{}-refreshed", token_for(email));
    state.add_profile(&token, profile.clone());
    Json(json!({ "access_token": token })).into_response()
}

async fn list_quizzes(State(state): Stub, headers: HeaderMap) -> Response {
    state.record("GET", "/api/quizzes", &headers, Value::Null);
    Json(json!([quiz_json("q1"), quiz_json("q2")])).into_response()
}

async fn get_quiz(State(state): Stub, headers: HeaderMap, Path(id): Path<String>) -> Response {
    state.record("GET", &format!("/api/quizzes/{id}"), &headers, Value::Null);
    if id == "missing" {
        return detail(StatusCode::NOT_FOUND, "Quiz not found");
    }
    Json(quiz_json(&id)).into_response()
}

async fn quiz_questions(Path(id): Path<String>) -> Response {
    Json(json!([question_json("qq1", &id), question_json("qq2", &id)])).into_response()
}

async fn start_quiz(State(state): Stub, headers: HeaderMap, Path(id): Path<String>) -> Response {
    state.record("POST", &format!("/api/quizzes/{id}/start"), &headers, Value::Null);
    Json(json!({ "attempt_id": format!("attempt-{id}") })).into_response()
}

async fn submit_answer(State(state): Stub, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    state.record("POST", &format!("/api/quiz-attempts/{id}/answer"), &headers, body.clone());
    let correct = body["selected_option"].as_u64() == Some(1);
    Json(json!({ "correct": correct })).into_response()
}

async fn complete_quiz(Path(id): Path<String>) -> Response {
    Json(attempt_json(&id)).into_response()
}

async fn my_attempts() -> Response {
    Json(json!([attempt_json("a1")])).into_response()
}

async fn admin_users(State(state): Stub, headers: HeaderMap) -> Response {
    state.record("GET", "/api/admin/users", &headers, Value::Null);
    Json(json!([account_json("u1", true), account_json("u2", false)])).into_response()
}

async fn admin_patch_user(State(state): Stub, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    state.record("PATCH", &format!("/api/admin/users/{id}"), &headers, body.clone());
    let active = body["is_active"].as_bool().unwrap_or(true);
    Json(account_json(&id, active)).into_response()
}

async fn admin_delete(State(state): Stub, headers: HeaderMap) -> Response {
    state.record("DELETE", "admin", &headers, Value::Null);
    StatusCode::NO_CONTENT.into_response()
}

async fn admin_create_quiz(State(state): Stub, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    state.record("POST", "/api/admin/quizzes", &headers, body.clone());
    let mut quiz = quiz_json("q-new");
    quiz["title"] = body["title"].clone();
    quiz["difficulty"] = body["difficulty"].clone();
    Json(quiz).into_response()
}

async fn admin_update_quiz(State(state): Stub, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    state.record("PUT", &format!("/api/admin/quizzes/{id}"), &headers, body.clone());
    let mut quiz = quiz_json(&id);
    if let Some(title) = body.get("title") {
        quiz["title"] = title.clone();
    }
    Json(quiz).into_response()
}

async fn admin_add_question(Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    let mut question = question_json("qq-new", &id);
    question["question_text"] = body["question_text"].clone();
    Json(question).into_response()
}

async fn admin_update_question(State(state): Stub, headers: HeaderMap, Path(id): Path<String>, Json(body): Json<Value>) -> Response {
    state.record("PUT", &format!("/api/admin/questions/{id}"), &headers, body.clone());
    Json(question_json(&id, "q1")).into_response()
}

async fn admin_stats() -> Response {
    Json(json!({
        "total_users": 12,
        "total_quizzes": 4,
        "total_attempts": 40,
        "active_users_today": 3
    }))
    .into_response()
}
