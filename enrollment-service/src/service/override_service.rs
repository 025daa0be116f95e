//! # Admin Override Service
//!
//! `OverrideEnrollment(student_id, course_id, action, reason, admin_id)`.
//! `force_enroll` runs the same transactional shape as one
//! `EnrollAll` iteration but skips every business-rule gate except
//! "no duplicate active enrollment"; `force_drop` is the student `Drop`
//! authorized regardless of ownership. Both write an `AuditLogEntry`
//! inside the same transaction as the mutation.

use serde::{Deserialize, Serialize};
use shared::database::with_transaction;
use shared::errors::{ApiError, FailureCause};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::entities::Enrollment;
use crate::repository::{CourseRepository, EnrollmentRepository};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideAction {
    ForceEnroll,
    ForceDrop,
}

pub struct OverrideService {
    pool: PgPool,
    enrollments: EnrollmentRepository,
    courses: CourseRepository,
}

impl OverrideService {
    pub fn new(pool: PgPool, enrollments: EnrollmentRepository, courses: CourseRepository) -> Self {
        Self {
            pool,
            enrollments,
            courses,
        }
    }

    /// `OverrideEnrollment`. `admin_id` is the acting
    /// principal, recorded as `actor_principal_id` on the audit row
    /// regardless of which student/course it concerns.
    #[instrument(skip(self, reason), fields(student_id = %student_id, course_id = %course_id, admin_id = %admin_id))]
    pub async fn override_enrollment(
        &self,
        admin_id: Uuid,
        student_id: Uuid,
        course_id: Uuid,
        action: OverrideAction,
        reason: &str,
    ) -> Result<Enrollment, ApiError> {
        match action {
            OverrideAction::ForceEnroll => self.force_enroll(admin_id, student_id, course_id, reason).await,
            OverrideAction::ForceDrop => self.force_drop(admin_id, student_id, course_id, reason).await,
        }
    }

    async fn force_enroll(
        &self,
        admin_id: Uuid,
        student_id: Uuid,
        course_id: Uuid,
        reason: &str,
    ) -> Result<Enrollment, ApiError> {
        let pool = self.pool.clone();
        let enrollments_repo = self.enrollments.clone();
        let courses_repo = self.courses.clone();
        let reason = reason.to_string();

        let enrollment = with_transaction(&pool, move |tx| {
            let enrollments_repo = enrollments_repo.clone();
            let courses_repo = courses_repo.clone();
            let reason = reason.clone();
            Box::pin(async move {
                let course = courses_repo
                    .lock_for_update(tx, course_id)
                    .await?
                    .ok_or_else(|| ApiError::NotFound {
                        resource: format!("course:{course_id}"),
                    })?;

                if enrollments_repo
                    .find_active(tx, student_id, course_id)
                    .await?
                    .is_some()
                {
                    return Err(ApiError::precondition(
                        FailureCause::DuplicateActiveEnrollment,
                        format!("already enrolled in {}", course.code),
                    ));
                }

                let enrollment = enrollments_repo
                    .insert(tx, student_id, course_id, &course.schedule)
                    .await?;
                courses_repo.increment_enrolled(tx, course_id).await?;

                shared::audit::record(
                    tx,
                    admin_id,
                    "override_force_enroll",
                    &format!("enrollment:student:{student_id}:course:{course_id}"),
                    &reason,
                )
                .await?;

                Ok(enrollment)
            })
        })
        .await?;

        info!(student_id = %student_id, course_id = %course_id, "force_enroll committed");
        Ok(enrollment)
    }

    async fn force_drop(
        &self,
        admin_id: Uuid,
        student_id: Uuid,
        course_id: Uuid,
        reason: &str,
    ) -> Result<Enrollment, ApiError> {
        let pool = self.pool.clone();
        let enrollments_repo = self.enrollments.clone();
        let courses_repo = self.courses.clone();
        let reason = reason.to_string();

        let enrollment = with_transaction(&pool, move |tx| {
            let enrollments_repo = enrollments_repo.clone();
            let courses_repo = courses_repo.clone();
            let reason = reason.clone();
            Box::pin(async move {
                let dropped = enrollments_repo.mark_dropped(tx, student_id, course_id).await?;
                courses_repo.decrement_enrolled(tx, course_id).await?;

                shared::audit::record(
                    tx,
                    admin_id,
                    "override_force_drop",
                    &format!("enrollment:student:{student_id}:course:{course_id}"),
                    &reason,
                )
                .await?;

                Ok(dropped)
            })
        })
        .await?;

        info!(student_id = %student_id, course_id = %course_id, "force_drop committed");
        Ok(enrollment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_action_round_trips_through_serde() {
        let json = serde_json::to_string(&OverrideAction::ForceEnroll).unwrap();
        assert_eq!(json, "\"force_enroll\"");
        let back: OverrideAction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, OverrideAction::ForceEnroll);
    }
}
