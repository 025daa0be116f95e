//! # User Repository (write-side)
//!
//! `admin-service` is the sole writer of `users`; other
//! services read it directly as reference data (see `grade-service`'s
//! read-only `UserRepository`, documented in `DESIGN.md`).

use shared::errors::ApiError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::entities::{UserRole, UserRow};

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRow>, ApiError> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, email, full_name, password_hash, role, is_active, \
                    student_id, major, year_level, faculty_id, department, \
                    created_at, updated_at \
             FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn email_exists(&self, email: &str) -> Result<bool, ApiError> {
        let row: Option<(i32,)> = sqlx::query_as("SELECT 1 FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(ApiError::DatabaseError)?;
        Ok(row.is_some())
    }

    /// `CreateUser`: inserts the role-scoped row; the caller
    /// supplies an already-bcrypt-hashed password.
    #[allow(clippy::too_many_arguments)]
    #[instrument(skip(self, password_hash))]
    pub async fn insert(
        &self,
        email: &str,
        full_name: &str,
        password_hash: &str,
        role: UserRole,
        student_id: Option<&str>,
        major: Option<&str>,
        year_level: Option<i32>,
        faculty_id: Option<&str>,
        department: Option<&str>,
    ) -> Result<UserRow, ApiError> {
        sqlx::query_as::<_, UserRow>(
            "INSERT INTO users (id, email, full_name, password_hash, role, is_active, \
                                 student_id, major, year_level, faculty_id, department) \
             VALUES ($1, $2, $3, $4, $5, TRUE, $6, $7, $8, $9, $10) \
             RETURNING id, email, full_name, password_hash, role, is_active, \
                       student_id, major, year_level, faculty_id, department, \
                       created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(full_name)
        .bind(password_hash)
        .bind(role)
        .bind(student_id)
        .bind(major)
        .bind(year_level)
        .bind(faculty_id)
        .bind(department)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// `ToggleUserStatus`: deactivates or reactivates without
    /// deletion.
    #[instrument(skip(self))]
    pub async fn set_active(&self, id: Uuid, is_active: bool) -> Result<UserRow, ApiError> {
        sqlx::query_as::<_, UserRow>(
            "UPDATE users SET is_active = $2, updated_at = now() WHERE id = $1 \
             RETURNING id, email, full_name, password_hash, role, is_active, \
                       student_id, major, year_level, faculty_id, department, \
                       created_at, updated_at",
        )
        .bind(id)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("user:{id}"),
        })
    }

    /// `ResetPassword`: the caller supplies a freshly hashed
    /// password; the plaintext never reaches this layer.
    #[instrument(skip(self, password_hash))]
    pub async fn set_password_hash(&self, id: Uuid, password_hash: &str) -> Result<(), ApiError> {
        let result = sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: format!("user:{id}"),
            });
        }
        Ok(())
    }
}
