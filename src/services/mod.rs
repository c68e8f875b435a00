//! Typed wrappers over the backend's REST endpoints.
//!
//! ARCHITECTURE
//! ============
//! Each service owns a cloned [`ApiGateway`](crate::api::ApiGateway) and maps
//! one method to one endpoint. No client-side logic lives here; session
//! bookkeeping belongs to [`crate::session`].

pub mod admin;
pub mod auth;
pub mod quiz;

pub use admin::AdminService;
pub use auth::AuthService;
pub use quiz::QuizService;
