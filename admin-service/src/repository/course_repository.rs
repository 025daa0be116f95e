//! # Course Repository (admin write-side)
//!
//! `catalog-service` owns `courses` for reads; `admin-service` is the only
//! writer for `UpdateCourse`/`DeleteCourse`. `CreateCourse`
//! and `SetPrerequisites` are not part of that surface and are
//! deliberately not added here.

use shared::errors::ApiError;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::domain::entities::Course;

#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError> {
        sqlx::query_as::<_, Course>(
            "SELECT id, code, title, units, capacity, enrolled, schedule, faculty_id, \
                    is_open, semester, room \
             FROM courses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// `UpdateCourse`: capacity-below-`enrolled` is rejected
    /// by the service layer before this is called, since that check needs
    /// the current `enrolled` value this statement would otherwise race.
    #[instrument(skip(self))]
    pub async fn update(
        &self,
        id: Uuid,
        title: &str,
        capacity: i32,
        schedule: &str,
        is_open: bool,
        room: Option<&str>,
    ) -> Result<Course, ApiError> {
        sqlx::query_as::<_, Course>(
            "UPDATE courses SET title = $2, capacity = $3, schedule = $4, is_open = $5, \
                    room = $6, updated_at = now() \
             WHERE id = $1 \
             RETURNING id, code, title, units, capacity, enrolled, schedule, faculty_id, \
                       is_open, semester, room",
        )
        .bind(id)
        .bind(title)
        .bind(capacity)
        .bind(schedule)
        .bind(is_open)
        .bind(room)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("course:{id}"),
        })
    }

    /// Counts enrollments in `{enrolled, completed}` referencing `id`,
    /// used to gate `DeleteCourse`.
    #[instrument(skip(self))]
    pub async fn active_enrollment_count(&self, id: Uuid) -> Result<i64, ApiError> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM enrollments \
             WHERE course_id = $1 AND status IN ('enrolled', 'completed')",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?;
        Ok(row.0)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(ApiError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound {
                resource: format!("course:{id}"),
            });
        }
        Ok(())
    }
}
