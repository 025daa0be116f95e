//! # Enrollment Service — the concurrency-hard core
//!
//! `EnrollAll`, `Drop`. `EnrollAll`'s pre-transaction gates are
//! cheap and informational (the hydrated cart may already be stale by the
//! time the transaction body runs); the transaction body re-reads every
//! course under a row lock and is the sole source of truth for capacity
//! and duplicate-enrollment checks.

use shared::database::with_transaction;
use shared::errors::{ApiError, FailureCause};
use sqlx::PgPool;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::domain::entities::Enrollment;
use crate::repository::{CartRepository, ConfigRepository, CourseRepository, EnrollmentRepository};
use crate::service::cart_service::CartService;

/// `EnrollAllResponse` core: the RPC either succeeds with every
/// cart item enrolled, or fails with no state change — there is no
/// embedded partial-success shape.
#[derive(Debug, Clone)]
pub struct EnrollAllOutcome {
    pub enrollments: Vec<Enrollment>,
    pub total_units: i32,
}

pub struct EnrollmentService {
    pool: PgPool,
    enrollments: EnrollmentRepository,
    courses: CourseRepository,
    carts: CartRepository,
    config: ConfigRepository,
    max_units_per_semester: i32,
}

impl EnrollmentService {
    pub fn new(
        pool: PgPool,
        enrollments: EnrollmentRepository,
        courses: CourseRepository,
        carts: CartRepository,
        config: ConfigRepository,
        max_units_per_semester: i32,
    ) -> Self {
        Self {
            pool,
            enrollments,
            courses,
            carts,
            config,
            max_units_per_semester,
        }
    }

    /// `EnrollAll`. `cart_service` supplies the hydrated,
    /// pre-transaction view; this method runs the pre-transaction gates,
    /// then the all-or-nothing transaction body.
    #[instrument(skip(self, cart_service), fields(student_id = %student_id))]
    pub async fn enroll_all(
        &self,
        cart_service: &CartService,
        student_id: Uuid,
    ) -> Result<EnrollAllOutcome, ApiError> {
        cart_service.require_enrollment_enabled().await?;

        let hydrated = cart_service.get_cart(student_id).await?;

        if hydrated.items.is_empty() {
            return Err(ApiError::precondition(FailureCause::CartEmpty, "cart is empty"));
        }
        if hydrated.has_conflicts() {
            return Err(ApiError::precondition(
                FailureCause::ScheduleConflict,
                "cart contains a schedule conflict",
            ));
        }
        if !hydrated.missing_prerequisites.is_empty() {
            return Err(ApiError::precondition(
                FailureCause::MissingPrerequisite,
                "prerequisites not met for one or more courses in the cart",
            ));
        }

        let max_units = self
            .config
            .int_or("max_units_per_semester", self.max_units_per_semester)
            .await?;
        if hydrated.total_units > max_units {
            return Err(ApiError::precondition(
                FailureCause::UnitCapExceeded,
                format!("cart totals {} units, exceeding the {max_units}-unit cap", hydrated.total_units),
            ));
        }

        let items: Vec<(Uuid, String, String)> = hydrated
            .items
            .iter()
            .map(|c| (c.course_id, c.code.clone(), c.schedule.clone()))
            .collect();

        let pool = self.pool.clone();
        let enrollments_repo = self.enrollments.clone();
        let courses_repo = self.courses.clone();
        let carts_repo = self.carts.clone();

        let enrollments = with_transaction(&pool, move |tx| {
            let items = items.clone();
            let enrollments_repo = enrollments_repo.clone();
            let courses_repo = courses_repo.clone();
            let carts_repo = carts_repo.clone();
            Box::pin(async move {
                let mut created = Vec::with_capacity(items.len());

                for (course_id, code, schedule) in items.into_iter() {
                    let course = courses_repo
                        .lock_for_update(tx, course_id)
                        .await?
                        .ok_or_else(|| ApiError::NotFound {
                            resource: format!("course:{course_id}"),
                        })?;

                    if !course.is_open {
                        return Err(ApiError::precondition(
                            FailureCause::CourseClosed,
                            format!("course {code} is not open for enrollment"),
                        ));
                    }
                    if course.seats_remaining() <= 0 {
                        return Err(ApiError::precondition(
                            FailureCause::CourseFull,
                            format!("course {code} is full"),
                        ));
                    }

                    if enrollments_repo
                        .find_active(tx, student_id, course_id)
                        .await?
                        .is_some()
                    {
                        return Err(ApiError::precondition(
                            FailureCause::DuplicateActiveEnrollment,
                            format!("already enrolled in {code}"),
                        ));
                    }

                    let enrollment = enrollments_repo
                        .insert(tx, student_id, course_id, &schedule)
                        .await?;
                    courses_repo.increment_enrolled(tx, course_id).await?;
                    created.push(enrollment);
                }

                carts_repo.delete(tx, student_id).await?;

                Ok(created)
            })
        })
        .await?;

        info!(
            student_id = %student_id,
            n = enrollments.len(),
            "EnrollAll committed"
        );

        let total_units = hydrated.total_units;
        Ok(EnrollAllOutcome {
            enrollments,
            total_units,
        })
    }

    /// `Drop`: flips the active enrollment and decrements the
    /// seat counter atomically, in the same transaction.
    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub async fn drop_course(&self, student_id: Uuid, course_id: Uuid) -> Result<Enrollment, ApiError> {
        let pool = self.pool.clone();
        let enrollments_repo = self.enrollments.clone();
        let courses_repo = self.courses.clone();

        with_transaction(&pool, move |tx| {
            let enrollments_repo = enrollments_repo.clone();
            let courses_repo = courses_repo.clone();
            Box::pin(async move {
                let dropped = enrollments_repo.mark_dropped(tx, student_id, course_id).await?;
                courses_repo.decrement_enrolled(tx, course_id).await?;
                Ok(dropped)
            })
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enroll_all_outcome_carries_total_units() {
        let outcome = EnrollAllOutcome {
            enrollments: Vec::new(),
            total_units: 15,
        };
        assert_eq!(outcome.total_units, 15);
        assert!(outcome.enrollments.is_empty());
    }
}
