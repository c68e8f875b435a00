//! # quiz-client
//!
//! Client-side session manager and typed HTTP wrappers for a remote quiz
//! backend. The [`session::SessionManager`] owns who is logged in; the
//! [`api::ApiGateway`] owns how requests reach the backend; the
//! [`services`] map one method to one endpoint.
//!
//! [`client::QuizClient`] wires these together from a
//! [`config::ClientConfig`]. The `quiz` binary is a thin command-line
//! front end over it.

pub mod api;
pub mod client;
pub mod config;
pub mod services;
pub mod session;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use client::QuizClient;
pub use config::ClientConfig;
