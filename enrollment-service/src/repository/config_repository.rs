//! # Config Repository (read-only)
//!
//! `system_config` is administered by `admin-service`, but the
//! `enrollment_enabled` gate is read on the hot path of `AddToCart` and
//! `EnrollAll` — read directly from this service's own pool rather than
//! an RPC, the same documented relaxation `grade-service` applies to
//! `users` (reference-data carve-out; see `DESIGN.md`).

use shared::errors::ApiError;
use sqlx::PgPool;
use tracing::instrument;

#[derive(Clone)]
pub struct ConfigRepository {
    pool: PgPool,
}

impl ConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM system_config WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        Ok(row.map(|(value,)| value))
    }

    /// Fail-closed: absent key or any value other than the literal
    /// `"true"` means enrollment is disabled.
    #[instrument(skip(self))]
    pub async fn enrollment_enabled(&self) -> Result<bool, ApiError> {
        Ok(self.get("enrollment_enabled").await?.as_deref() == Some("true"))
    }

    /// Falls back to `default` when the key is absent or unparseable; used
    /// for `max_units_per_semester` (default 18).
    #[instrument(skip(self))]
    pub async fn int_or(&self, key: &str, default: i32) -> Result<i32, ApiError> {
        Ok(self
            .get(key)
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(default))
    }
}

#[cfg(test)]
mod tests {
    // `enrollment_enabled`'s fail-closed behavior is exercised end-to-end
    // against a real `system_config` table by the service-layer tests.
}
