//! Database operations for the storefront `PostgreSQL` instance.
//!
//! # Tables
//!
//! - `deals` - Flash-deal listings (local source of truth for schedule,
//!   pricing, and inventory counters)
//! - `notifications` - Polled in-app notifications
//! - `purchases` - Checkout hand-offs per user, decrementing deal inventory
//! - `users` - Site accounts with argon2 password hashes
//! - `admin_users` - Users granted access to the admin surface
//! - `tower_sessions`' own table, managed by its store
//!
//! Queries use runtime-checked `query_as`/`query` (no prepared-statement
//! cache is committed, so compile-time verification is not available).
//! Migrations are embedded from `migrations/` and run at startup.

pub mod admin_users;
pub mod deals;
pub mod notifications;
pub mod purchases;
pub mod users;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use deals::DealRepository;
pub use notifications::NotificationRepository;
pub use purchases::PurchaseRepository;
pub use users::UserRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying database failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row violated an invariant the code relies on.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

impl RepositoryError {
    /// Whether this error is a unique-constraint violation.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Database(sqlx::Error::Database(db)) => db.is_unique_violation(),
            _ => false,
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
