//! # Course Repository (transactional write-side)
//!
//! `catalog-service` owns `courses` for reads (`GetCourse`,
//! `GetCourseAvailability`), but `EnrollAll`/`Drop`/`OverrideEnrollment`
//! must re-read and increment/decrement `enrolled` inside their own
//! transaction under a row lock — a cross-service HTTP round trip cannot
//! participate in that transaction, so this service holds its own narrow,
//! write-side view of `courses`, re-read fresh under a write lock inside
//! the transaction. `course.enrolled` is mutated only here, only via
//! `$inc ±1`, never written absolutely.

use shared::errors::ApiError;
use sqlx::{Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

/// The subset of course fields the enrollment transaction needs, re-read
/// fresh inside the transaction to avoid stale `is_open`/`enrolled`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub code: String,
    pub capacity: i32,
    pub enrolled: i32,
    pub is_open: bool,
    pub schedule: String,
}

impl CourseRow {
    pub fn seats_remaining(&self) -> i32 {
        (self.capacity - self.enrolled).max(0)
    }
}

#[derive(Clone)]
pub struct CourseRepository;

impl CourseRepository {
    pub fn new() -> Self {
        Self
    }

    /// Locks and returns the course row, inside the caller's transaction,
    /// to avoid acting on a stale `is_open`/`enrolled`.
    #[instrument(skip(self, tx))]
    pub async fn lock_for_update<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        course_id: Uuid,
    ) -> Result<Option<CourseRow>, ApiError> {
        sqlx::query_as::<_, CourseRow>(
            "SELECT id, code, capacity, enrolled, is_open, schedule FROM courses WHERE id = $1 FOR UPDATE",
        )
        .bind(course_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// `$inc +1` on `course.enrolled`, mutated only inside transactions
    /// and only via `$inc ±1`.
    #[instrument(skip(self, tx))]
    pub async fn increment_enrolled<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        course_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query("UPDATE courses SET enrolled = enrolled + 1, updated_at = now() WHERE id = $1")
            .bind(course_id)
            .execute(&mut **tx)
            .await
            .map_err(ApiError::DatabaseError)?;
        Ok(())
    }

    /// `$inc -1` on `course.enrolled`.
    #[instrument(skip(self, tx))]
    pub async fn decrement_enrolled<'a>(
        &self,
        tx: &mut Transaction<'a, Postgres>,
        course_id: Uuid,
    ) -> Result<(), ApiError> {
        sqlx::query(
            "UPDATE courses SET enrolled = GREATEST(enrolled - 1, 0), updated_at = now() \
             WHERE id = $1",
        )
        .bind(course_id)
        .execute(&mut **tx)
        .await
        .map_err(ApiError::DatabaseError)?;
        Ok(())
    }
}

impl Default for CourseRepository {
    fn default() -> Self {
        Self::new()
    }
}
