//! HTTP handlers, one module per resource.

pub mod auth;
pub mod feed;
pub mod follows;
pub mod health;
pub mod reviews;
pub mod tickets;
