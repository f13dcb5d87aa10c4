//! HTTP layer for the LITReview service.
//!
//! This crate wires the domain logic in `litreview-core` and the Postgres
//! stores in `litreview-postgres` into an Axum application: request parsing,
//! session authentication, JSON responses, and error mapping.
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Extractors** resolve the session user from the bearer token
//! 3. **Validation** runs against the domain rules in `litreview-core`
//! 4. **Stores** persist or load through the repository traits
//! 5. **Errors** map to JSON problem responses via [`AppError`]

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use extractors::{BearerToken, SessionUser};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
