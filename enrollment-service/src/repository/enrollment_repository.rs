//! # Enrollment Repository
//!
//! PostgreSQL access to the `enrollments` table. Every mutation that must
//! participate in `EnrollAll`/`Drop`/`OverrideEnrollment`'s atomicity
//! takes an open `sqlx::Transaction` rather than the pool directly; read-only lookups
//! used outside a transaction (listing, the internal lookup/roster
//! endpoints) go through the pool.

use chrono::Utc;
use shared::errors::ApiError;
use sqlx::{PgPool, Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

use crate::domain::entities::Enrollment;

#[derive(Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Finds the active (`status=enrolled`) enrollment for `(student,
    /// course)`, if any.
    #[instrument(skip(self, tx))]
    pub async fn find_active<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, ApiError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, student_id, course_id, status, enrolled_at, dropped_at, schedule_info \
             FROM enrollments WHERE student_id = $1 AND course_id = $2 AND status = 'enrolled' \
             FOR UPDATE",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Inserts a new enrollment row.
    #[instrument(skip(self, tx, schedule_info))]
    pub async fn insert<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        student_id: Uuid,
        course_id: Uuid,
        schedule_info: &str,
    ) -> Result<Enrollment, ApiError> {
        sqlx::query_as::<_, Enrollment>(
            "INSERT INTO enrollments (id, student_id, course_id, status, enrolled_at, schedule_info) \
             VALUES ($1, $2, $3, 'enrolled', $4, $5) \
             RETURNING id, student_id, course_id, status, enrolled_at, dropped_at, schedule_info",
        )
        .bind(Uuid::new_v4())
        .bind(student_id)
        .bind(course_id)
        .bind(Utc::now())
        .bind(schedule_info)
        .fetch_one(&mut **tx)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Flips the one active enrollment for `(student, course)` to
    /// `dropped`. Returns `NotFound`
    /// if no active row matches.
    #[instrument(skip(self, tx))]
    pub async fn mark_dropped<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Enrollment, ApiError> {
        sqlx::query_as::<_, Enrollment>(
            "UPDATE enrollments SET status = 'dropped', dropped_at = $3 \
             WHERE student_id = $1 AND course_id = $2 AND status = 'enrolled' \
             RETURNING id, student_id, course_id, status, enrolled_at, dropped_at, schedule_info",
        )
        .bind(student_id)
        .bind(course_id)
        .bind(Utc::now())
        .fetch_optional(&mut **tx)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound {
            resource: format!("active enrollment for student:{student_id} course:{course_id}"),
        })
    }

    /// All enrollments for a student, newest first — used to build the
    /// post-commit `EnrollAll` response.
    #[instrument(skip(self))]
    pub async fn list_by_student(&self, student_id: Uuid) -> Result<Vec<Enrollment>, ApiError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, student_id, course_id, status, enrolled_at, dropped_at, schedule_info \
             FROM enrollments WHERE student_id = $1 ORDER BY enrolled_at DESC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// `GET /internal/enrollments/lookup` (consumed by `grade-service`'s
    /// `UploadGrades`): the enrollment for `(student,
    /// course)` in status `{enrolled, completed}`.
    #[instrument(skip(self))]
    pub async fn find_enrolled_or_completed(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Option<Enrollment>, ApiError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, student_id, course_id, status, enrolled_at, dropped_at, schedule_info \
             FROM enrollments \
             WHERE student_id = $1 AND course_id = $2 AND status IN ('enrolled', 'completed') \
             ORDER BY enrolled_at DESC LIMIT 1",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// `GET /internal/enrollments/roster` (consumed by `grade-service`'s
    /// `GetClassRoster`): active enrollments for a course.
    #[instrument(skip(self))]
    pub async fn list_active_for_course(&self, course_id: Uuid) -> Result<Vec<Enrollment>, ApiError> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, student_id, course_id, status, enrolled_at, dropped_at, schedule_info \
             FROM enrollments WHERE course_id = $1 AND status = 'enrolled' \
             ORDER BY enrolled_at",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }
}
