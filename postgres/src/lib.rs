//! `PostgreSQL` repositories for LITReview.
//!
//! This crate implements the repository traits from `litreview-core` on top
//! of sqlx connection pools. Queries are runtime-checked so the workspace
//! builds without a live database; the schema lives in embedded migrations.
//!
//! # Example
//!
//! ```ignore
//! use litreview_postgres::{connect_pool, run_migrations, PostgresTicketStore};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = connect_pool("postgres://localhost/litreview", 10).await?;
//!     run_migrations(&pool).await?;
//!     let tickets = PostgresTicketStore::new(pool);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod follows;
pub mod reviews;
pub mod sessions;
pub mod tickets;
pub mod users;

pub use follows::PostgresFollowStore;
pub use reviews::PostgresReviewStore;
pub use sessions::PostgresSessionStore;
pub use tickets::PostgresTicketStore;
pub use users::PostgresUserStore;

use litreview_core::{DomainError, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Open a connection pool against the given database URL.
///
/// # Errors
///
/// Returns [`DomainError::Storage`] if the pool cannot be established.
pub async fn connect_pool(url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await
        .map_err(|e| DomainError::Storage(format!("failed to connect to postgres: {e}")))
}

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns [`DomainError::Storage`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DomainError::Storage(format!("migration failed: {e}")))?;
    Ok(())
}

/// Map a sqlx error into the domain taxonomy, treating a unique-constraint
/// violation as [`DomainError::AlreadyExists`] for the given resource.
pub(crate) fn map_insert_error(e: &sqlx::Error, resource: &'static str) -> DomainError {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.is_unique_violation() {
            return DomainError::AlreadyExists(resource);
        }
    }
    DomainError::Storage(format!("failed to insert {resource}: {e}"))
}
