//! # PostgreSQL Connection Pool + Transaction Helper
//!
//! Database connection management using sqlx's async connection pool, plus
//! the multi-statement transaction helper that backs the enrollment
//! pipeline's atomicity guarantees.
//!
//! ## Why a helper instead of ad-hoc `pool.begin()` everywhere?
//!
//! `EnrollAll`/`Drop`/`OverrideEnrollment` need to behave as a single
//! multi-statement transaction with no application-level locking, and a
//! deadline-exceeded abort must never leave a partial commit. `sqlx`'s
//! `Transaction` already rolls back on `Drop` if `commit()` was never called,
//! which gives us that for free as long as every fallible step uses `?`
//! inside the closure passed to [`with_transaction`] — a single place to get
//! that right rather than re-deriving it in every service.
//!
//! ## Pool Sizing
//!
//! | Parameter | Default |
//! |-----------|---------|
//! | `max_connections` | 50 |
//! | `min_connections` | 10 |
//! | `idle_timeout` | 30s |

use crate::config::DatabaseConfig;
use crate::errors::ApiError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::time::Duration;
use tracing::info;

/// Creates a PostgreSQL connection pool sized per the configured limits.
///
/// `PgPool` is `Arc`-backed internally, so cloning it into `web::Data` is
/// cheap and safe to share across handlers.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, ApiError> {
    info!(
        max_connections = config.max_connections,
        min_connections = config.min_connections,
        idle_timeout_seconds = config.idle_timeout_seconds,
        "creating database connection pool"
    );

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .max_lifetime(Duration::from_secs(config.max_lifetime_seconds))
        .test_before_acquire(true)
        .connect(&config.url)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to create database pool");
            ApiError::DatabaseError(e)
        })?;

    info!("database connection pool created");

    Ok(pool)
}

/// Verifies database connectivity for health-check endpoints.
pub async fn health_check(pool: &PgPool) -> Result<(), ApiError> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map_err(ApiError::DatabaseError)?;

    Ok(())
}

/// Runs `f` inside a single Postgres transaction and commits on success.
///
/// `f` receives a `&mut sqlx::Transaction<'_, sqlx::Postgres>` and must route
/// every statement through it rather than the outer pool — this is what
/// gives `EnrollAll`/`Drop`/`OverrideEnrollment` their all-or-nothing
/// semantics. On any `Err`, the transaction is dropped without `commit()`,
/// which `sqlx` rolls back automatically.
///
/// No application-level lock is taken here or anywhere else; concurrent
/// transactions touching the same `courses` row serialize through Postgres's
/// own row-level locking (`SELECT ... FOR UPDATE`, used by callers inside
/// `f`) rather than through in-memory mutexes.
pub async fn with_transaction<T, F, Fut>(pool: &PgPool, f: F) -> Result<T, ApiError>
where
    F: for<'a> FnOnce(&'a mut sqlx::Transaction<'_, sqlx::Postgres>) -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut tx = pool.begin().await.map_err(ApiError::DatabaseError)?;

    let result = f(&mut tx).await;

    match result {
        Ok(value) => {
            tx.commit().await.map_err(ApiError::DatabaseError)?;
            Ok(value)
        }
        Err(err) => {
            // tx is dropped here without commit(); sqlx issues ROLLBACK.
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    // `with_transaction` is exercised end-to-end by each service's own
    // `sqlx::test`-backed integration tests (against a real schema); pure
    // unit tests here would only re-assert sqlx's own rollback-on-drop
    // behavior.
}
