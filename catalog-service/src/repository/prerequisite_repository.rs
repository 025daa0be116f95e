//! # Prerequisite Repository
//!
//! PostgreSQL-backed access to the `prerequisites` table: directed edges
//! `course_id -> prereq_course_id`. The graph is not validated
//! for cycles; `CheckPrerequisites` only ever follows direct edges.

use shared::errors::ApiError;
use sqlx::PgPool;
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::entities::Prerequisite;

#[derive(Clone)]
pub struct PrerequisiteRepository {
    pool: PgPool,
}

impl PrerequisiteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the direct prerequisite edges for `course_id`.
    #[instrument(skip(self), fields(course_id = %course_id))]
    pub async fn find_for_course(&self, course_id: Uuid) -> Result<Vec<Prerequisite>, ApiError> {
        sqlx::query_as::<_, Prerequisite>(
            "SELECT id, course_id, prereq_course_id, created_at \
             FROM prerequisites WHERE course_id = $1",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to fetch prerequisites");
            ApiError::InternalError {
                message: "failed to fetch prerequisites".to_string(),
            }
        })
    }
}
