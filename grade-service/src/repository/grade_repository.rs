//! # Grade Repository
//!
//! PostgreSQL-backed access to the `grades` table, keyed by `enrollment_id`.
//! Concurrent uploads for the same key are last-writer-wins via
//! Postgres's own `INSERT ... ON CONFLICT DO UPDATE` — no application-level
//! locking is needed since the database's own atomic upsert handles it.

use chrono::Utc;
use shared::errors::ApiError;
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::entities::Grade;

const GRADE_COLUMNS: &str = "enrollment_id, student_id, course_id, course_code, course_title, \
    units, semester, grade, uploaded_by, uploaded_at, published, published_at, \
    last_modified_by, last_modified_at";

/// Denormalized course facts snapshotted onto each grade row so historical
/// grades still render correct course details after a catalog edit.
#[derive(Debug, Clone)]
pub struct CourseSnapshot {
    pub code: String,
    pub title: String,
    pub units: i32,
    pub semester: String,
}

#[derive(Clone)]
pub struct GradeRepository {
    pool: PgPool,
}

impl GradeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Upserts the grade for `enrollment_id`: creates with `published=false`
    /// or updates the letter grade and `last_modified_*`, leaving
    /// `published`/`published_at` untouched on update.
    #[instrument(skip(self, course), fields(enrollment_id = %enrollment_id))]
    pub async fn upsert(
        &self,
        enrollment_id: Uuid,
        student_id: Uuid,
        course_id: Uuid,
        course: &CourseSnapshot,
        letter: &str,
        actor: Uuid,
    ) -> Result<Grade, ApiError> {
        let now = Utc::now();

        sqlx::query_as::<_, Grade>(&format!(
            "INSERT INTO grades ({GRADE_COLUMNS}) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, false, NULL, $9, $10) \
             ON CONFLICT (enrollment_id) DO UPDATE SET \
                grade = EXCLUDED.grade, \
                last_modified_by = EXCLUDED.last_modified_by, \
                last_modified_at = EXCLUDED.last_modified_at \
             RETURNING {GRADE_COLUMNS}"
        ))
        .bind(enrollment_id)
        .bind(student_id)
        .bind(course_id)
        .bind(&course.code)
        .bind(&course.title)
        .bind(course.units)
        .bind(&course.semester)
        .bind(letter)
        .bind(actor)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to upsert grade");
            ApiError::InternalError {
                message: "failed to record grade".to_string(),
            }
        })
    }

    #[instrument(skip(self))]
    pub async fn find_by_enrollment(&self, enrollment_id: Uuid) -> Result<Option<Grade>, ApiError> {
        sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE enrollment_id = $1"
        ))
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Grades visible to the student: `published=true` only, optionally
    /// filtered by semester.
    #[instrument(skip(self))]
    pub async fn list_published_for_student(
        &self,
        student_id: Uuid,
        semester: Option<&str>,
    ) -> Result<Vec<Grade>, ApiError> {
        let query = match semester {
            Some(_) => format!(
                "SELECT {GRADE_COLUMNS} FROM grades \
                 WHERE student_id = $1 AND published = true AND semester = $2 \
                 ORDER BY course_code"
            ),
            None => format!(
                "SELECT {GRADE_COLUMNS} FROM grades \
                 WHERE student_id = $1 AND published = true \
                 ORDER BY semester, course_code"
            ),
        };

        let mut q = sqlx::query_as::<_, Grade>(&query).bind(student_id);
        if let Some(s) = semester {
            q = q.bind(s);
        }

        q.fetch_all(&self.pool).await.map_err(ApiError::DatabaseError)
    }

    /// All grades for a course, published or not (faculty-only view).
    #[instrument(skip(self))]
    pub async fn list_for_course(&self, course_id: Uuid) -> Result<Vec<Grade>, ApiError> {
        sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE course_id = $1 ORDER BY student_id"
        ))
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Flips `published` false-or-absent -> true for every grade of the
    /// course; returns the number of rows modified. Idempotent: a second
    /// call modifies zero rows and still succeeds.
    #[instrument(skip(self))]
    pub async fn publish_course(&self, course_id: Uuid) -> Result<u64, ApiError> {
        let result = sqlx::query(
            "UPDATE grades SET published = true, published_at = $2 \
             WHERE course_id = $1 AND published = false",
        )
        .bind(course_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(result.rows_affected())
    }

    /// All published grades for a student across every semester, the raw
    /// material for GPA aggregation — semester filtering and grade-point
    /// arithmetic happen in the service layer so
    /// both `term_gpa` and `semester_breakdown` are derived from one
    /// consistent snapshot.
    #[instrument(skip(self))]
    pub async fn list_published_for_gpa(&self, student_id: Uuid) -> Result<Vec<Grade>, ApiError> {
        sqlx::query_as::<_, Grade>(&format!(
            "SELECT {GRADE_COLUMNS} FROM grades WHERE student_id = $1 AND published = true"
        ))
        .bind(student_id)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)
    }

    /// Course ids among `course_ids` for which `student_id` holds a
    /// published, passing (`{A,B,C,D}`) grade.
    #[instrument(skip(self, course_ids), fields(n = course_ids.len()))]
    pub async fn passing_course_ids(
        &self,
        student_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<Vec<Uuid>, ApiError> {
        if course_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(Uuid,)> = sqlx::query_as(
            "SELECT course_id FROM grades \
             WHERE student_id = $1 AND course_id = ANY($2) \
                AND published = true AND grade IN ('A', 'B', 'C', 'D')",
        )
        .bind(student_id)
        .bind(course_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(ApiError::DatabaseError)?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
