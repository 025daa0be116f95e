//! # User Repository (read-only)
//!
//! The `users` table is administered by `admin-service`, but
//! `role`/`is_active` and display names are reference data every service
//! reads on the hot path of its own authorization checks — routing every
//! such lookup through an HTTP round trip to `admin-service` would turn a
//! single-row read into the dominant cost of `UploadGrades`/`GetClassRoster`.
//! This repository therefore reads `users` directly from the grade
//! service's own pool into the one shared schema; it never writes a row.
//! See `DESIGN.md` for the full writer/reader split across services.

use serde::{Deserialize, Serialize};
use shared::errors::ApiError;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Faculty,
    Admin,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub is_active: bool,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserSummary>, ApiError> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, full_name, role, is_active FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    #[instrument(skip(self, ids), fields(n = ids.len()))]
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<UserSummary>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, UserSummary>(
            "SELECT id, email, full_name, role, is_active FROM users WHERE id = ANY($1)",
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }
}
