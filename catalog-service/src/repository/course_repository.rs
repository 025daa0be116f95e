//! # Course Repository
//!
//! PostgreSQL-backed read access to the `courses` table.
//!
//! `ListCourses` filters are applied entirely in SQL rather than in
//! application code: the department-prefix and free-text filters both
//! compile to Postgres `~*` (case-insensitive regex) predicates, and
//! pagination/total-count run as two queries sharing the same `WHERE`
//! clause so the side-channel count matches the page that was returned.

use shared::errors::ApiError;
use sqlx::{PgPool, QueryBuilder};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::domain::entities::Course;

const COURSE_COLUMNS: &str = "id, code, title, units, capacity, enrolled, schedule, \
    faculty_id, is_open, semester, room, created_at, updated_at";

/// Filters accepted by `ListCourses`. Empty/absent values mean
/// "no filter" — malformed input is coerced rather than rejected.
#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    /// Department prefix, matched case-insensitively against `code` start.
    pub department_prefix: Option<String>,
    /// Free-text search, matched case-insensitively against `code` or `title`.
    pub search: Option<String>,
    pub open_only: bool,
    pub semester: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

/// Hard cap enforced regardless of the caller-requested page size.
pub const MAX_LIST_RESULTS: i64 = 100;

#[derive(Clone)]
pub struct CourseRepository {
    pool: PgPool,
}

impl CourseRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[instrument(skip(self), fields(course_id = %id))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, ApiError> {
        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to fetch course");
            ApiError::InternalError {
                message: "failed to fetch course".to_string(),
            }
        })
    }

    #[instrument(skip(self), fields(ids = ids.len()))]
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Course>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses WHERE id = ANY($1)"
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "failed to batch-fetch courses");
            ApiError::InternalError {
                message: "failed to fetch courses".to_string(),
            }
        })
    }

    /// Lists courses matching `filter`, sorted by `code` ascending and
    /// capped at [`MAX_LIST_RESULTS`] regardless of the requested `limit`.
    /// Returns `(page, total_count)` where `total_count` ignores pagination.
    #[instrument(skip(self, filter))]
    pub async fn list(&self, filter: &CourseFilter) -> Result<(Vec<Course>, i64), ApiError> {
        let limit = filter.limit.clamp(1, MAX_LIST_RESULTS);

        let mut count_builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM courses WHERE 1=1");
        let mut list_builder: QueryBuilder<sqlx::Postgres> =
            QueryBuilder::new(format!("SELECT {COURSE_COLUMNS} FROM courses WHERE 1=1"));

        if let Some(prefix) = filter.department_prefix.as_deref().filter(|s| !s.is_empty()) {
            let pattern = format!("^{}", regex_escape(prefix));
            count_builder.push(" AND code ~* ").push_bind(pattern.clone());
            list_builder.push(" AND code ~* ").push_bind(pattern);
        }

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            let pattern = regex_escape(search);
            count_builder
                .push(" AND (code ~* ")
                .push_bind(pattern.clone())
                .push(" OR title ~* ")
                .push_bind(pattern.clone())
                .push(")");
            list_builder
                .push(" AND (code ~* ")
                .push_bind(pattern.clone())
                .push(" OR title ~* ")
                .push_bind(pattern)
                .push(")");
        }

        if filter.open_only {
            count_builder.push(" AND is_open = true");
            list_builder.push(" AND is_open = true");
        }

        if let Some(semester) = filter.semester.as_deref().filter(|s| !s.is_empty()) {
            count_builder.push(" AND semester = ").push_bind(semester.to_string());
            list_builder.push(" AND semester = ").push_bind(semester.to_string());
        }

        list_builder
            .push(" ORDER BY code ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(filter.offset.max(0));

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to count courses");
                ApiError::InternalError {
                    message: "failed to list courses".to_string(),
                }
            })?;

        let courses = list_builder
            .build_query_as::<Course>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "failed to list courses");
                ApiError::InternalError {
                    message: "failed to list courses".to_string(),
                }
            })?;

        Ok((courses, total))
    }
}

/// Escapes regex metacharacters so free-text search terms aren't
/// interpreted as regex syntax by Postgres's `~*` operator.
fn regex_escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if "\\.^$|()[]{}*+?".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regex_escape_neutralizes_metacharacters() {
        assert_eq!(regex_escape("c++"), "c\\+\\+");
        assert_eq!(regex_escape("cs.101"), "cs\\.101");
    }

    #[test]
    fn test_filter_limit_clamped_to_max() {
        let filter = CourseFilter {
            limit: 500,
            ..Default::default()
        };
        assert_eq!(filter.limit.clamp(1, MAX_LIST_RESULTS), MAX_LIST_RESULTS);
    }
}
