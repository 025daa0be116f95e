//! # System Config Repository (write-side)
//!
//! `system_config` upsert, audited on every write. Read access
//! for the hot-path `enrollment_enabled` gate lives directly in
//! `enrollment-service`'s own `ConfigRepository` (see `DESIGN.md`).

use shared::errors::ApiError;
use sqlx::{Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone)]
pub struct ConfigRepository;

impl ConfigRepository {
    pub fn new() -> Self {
        Self
    }

    /// Upserts `key=value` inside `tx`, so the write and its audit row
    /// commit or roll back together.
    #[instrument(skip(self, tx))]
    pub async fn upsert<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        key: &str,
        value: &str,
        updated_by: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO system_config (key, value, updated_at, updated_by) \
             VALUES ($1, $2, now(), $3) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = now(), \
                updated_by = EXCLUDED.updated_by",
        )
        .bind(key)
        .bind(value)
        .bind(updated_by)
        .execute(&mut **tx)
        .await
        .map_err(ApiError::DatabaseError)?;
        Ok(())
    }
}

impl Default for ConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}
