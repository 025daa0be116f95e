//! # Cart Repository
//!
//! Single-document-style access to the `carts` table: single-writer-per-
//! student, not transactional with enrollment. Add uses Postgres array
//! append under `FOR UPDATE` so two concurrent adds of the same course
//! collapse to one.

use shared::errors::ApiError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::entities::Cart;

#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn find(&self, student_id: Uuid) -> Result<Option<Cart>, ApiError> {
        sqlx::query_as::<_, Cart>(
            "SELECT student_id, course_ids, updated_at FROM carts WHERE student_id = $1",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Returns the student's cart, creating an empty row if none exists.
    #[instrument(skip(self))]
    pub async fn find_or_create(&self, student_id: Uuid) -> Result<Cart, ApiError> {
        if let Some(cart) = self.find(student_id).await? {
            return Ok(cart);
        }

        sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (student_id, course_ids, updated_at) VALUES ($1, '{}', now()) \
             ON CONFLICT (student_id) DO UPDATE SET student_id = EXCLUDED.student_id \
             RETURNING student_id, course_ids, updated_at",
        )
        .bind(student_id)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Appends `course_id` if not already present; set-semantics makes this
    /// safe to call twice with the same id.
    #[instrument(skip(self))]
    pub async fn add_course(&self, student_id: Uuid, course_id: Uuid) -> Result<Cart, ApiError> {
        sqlx::query_as::<_, Cart>(
            "INSERT INTO carts (student_id, course_ids, updated_at) \
             VALUES ($1, ARRAY[$2]::uuid[], now()) \
             ON CONFLICT (student_id) DO UPDATE SET \
                course_ids = CASE \
                    WHEN $2 = ANY(carts.course_ids) THEN carts.course_ids \
                    ELSE carts.course_ids || $2 \
                END, \
                updated_at = now() \
             RETURNING student_id, course_ids, updated_at",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    #[instrument(skip(self))]
    pub async fn remove_course(&self, student_id: Uuid, course_id: Uuid) -> Result<Cart, ApiError> {
        sqlx::query_as::<_, Cart>(
            "UPDATE carts SET course_ids = array_remove(course_ids, $2), updated_at = now() \
             WHERE student_id = $1 \
             RETURNING student_id, course_ids, updated_at",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("cart:{student_id}"),
        })
    }

    #[instrument(skip(self))]
    pub async fn clear(&self, student_id: Uuid) -> Result<Cart, ApiError> {
        sqlx::query_as::<_, Cart>(
            "UPDATE carts SET course_ids = '{}', updated_at = now() WHERE student_id = $1 \
             RETURNING student_id, course_ids, updated_at",
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("cart:{student_id}"),
        })
    }

    /// Deletes the cart row entirely, used when `EnrollAll` commits.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        student_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query("DELETE FROM carts WHERE student_id = $1")
            .bind(student_id)
            .execute(&mut **tx)
            .await
            .map_err(ApiError::DatabaseError)?;
        Ok(())
    }
}
