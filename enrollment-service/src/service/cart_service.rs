//! # Cart Service
//!
//! `AddToCart`/`RemoveFromCart`/`ClearCart`/`GetCart`/`CheckConflicts`.
//! Cart mutations are single-document, non-transactional with
//! enrollment; every derived field — total units, conflicts, missing
//! prerequisites — is recomputed on read, never stored.

use shared::errors::{ApiError, FailureCause};
use shared::schedule::Schedule;
use tracing::instrument;
use uuid::Uuid;

use crate::clients::catalog_client::{CourseFacts, PrerequisiteEdge};
use crate::clients::CatalogClient;
use crate::repository::{CartRepository, ConfigRepository};

/// One course fact hydrated into a `GetCart` view.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub course_id: Uuid,
    pub code: String,
    pub title: String,
    pub units: i32,
    pub schedule: String,
    pub is_open: bool,
}

#[derive(Debug, Clone)]
pub struct ConflictPair {
    pub course_a: Uuid,
    pub course_b: Uuid,
}

#[derive(Debug, Clone)]
pub struct MissingPrerequisite {
    pub course_id: Uuid,
    pub missing_prereq_course_id: Uuid,
    pub missing_prereq_code: String,
}

#[derive(Debug, Clone)]
pub struct HydratedCart {
    pub items: Vec<CartItemView>,
    pub total_units: i32,
    pub conflicts: Vec<ConflictPair>,
    pub missing_prerequisites: Vec<MissingPrerequisite>,
}

impl HydratedCart {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }
}

pub struct CartService {
    carts: CartRepository,
    config: ConfigRepository,
    catalog: CatalogClient,
    max_cart_size: usize,
}

impl CartService {
    pub fn new(
        carts: CartRepository,
        config: ConfigRepository,
        catalog: CatalogClient,
        max_cart_size: usize,
    ) -> Self {
        Self {
            carts,
            config,
            catalog,
            max_cart_size,
        }
    }

    /// Fails closed when `system_config.enrollment_enabled` is absent or
    /// not `"true"`, for `AddToCart` and `EnrollAll` alike.
    #[instrument(skip(self))]
    pub async fn require_enrollment_enabled(&self) -> Result<(), ApiError> {
        if self.config.enrollment_enabled().await? {
            Ok(())
        } else {
            Err(ApiError::precondition(
                FailureCause::EnrollmentWindowClosed,
                "enrollment is not currently open",
            ))
        }
    }

    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub async fn add_to_cart(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<HydratedCart, ApiError> {
        self.require_enrollment_enabled().await?;

        let course = self.catalog.get_course(course_id).await?;
        if !course.is_open {
            return Err(ApiError::precondition(
                FailureCause::CourseClosed,
                format!("course {} is not open for enrollment", course.code),
            ));
        }

        let cart = self.carts.find_or_create(student_id).await?;
        if cart.course_ids.contains(&course_id) {
            return Err(ApiError::precondition(
                FailureCause::DuplicateInCart,
                format!("course {} is already in the cart", course.code),
            ));
        }
        if cart.course_ids.len() >= self.max_cart_size {
            return Err(ApiError::precondition(
                FailureCause::CartFull,
                format!("cart already holds the maximum of {} courses", self.max_cart_size),
            ));
        }

        self.carts.add_course(student_id, course_id).await?;
        self.get_cart(student_id).await
    }

    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub async fn remove_from_cart(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<HydratedCart, ApiError> {
        self.carts.remove_course(student_id, course_id).await?;
        self.get_cart(student_id).await
    }

    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn clear_cart(&self, student_id: Uuid) -> Result<HydratedCart, ApiError> {
        self.carts.clear(student_id).await?;
        self.get_cart(student_id).await
    }

    #[instrument(skip(self), fields(student_id = %student_id))]
    pub async fn get_cart(&self, student_id: Uuid) -> Result<HydratedCart, ApiError> {
        let cart = self.carts.find_or_create(student_id).await?;
        self.hydrate(student_id, &cart.course_ids).await
    }

    /// `CheckConflicts`: side-effect-free, independent of any
    /// stored cart — used by cart UIs before adding a course.
    #[instrument(skip(self, course_ids), fields(student_id = %student_id, n = course_ids.len()))]
    pub async fn check_conflicts(
        &self,
        student_id: Uuid,
        course_ids: &[Uuid],
    ) -> Result<Vec<ConflictPair>, ApiError> {
        let hydrated = self.hydrate(student_id, course_ids).await?;
        Ok(hydrated.conflicts)
    }

    /// Fetches course facts for every id, recomputing total units,
    /// schedule conflicts, and missing prerequisites. Courses that no
    /// longer exist are silently dropped from the returned view.
    async fn hydrate(&self, student_id: Uuid, course_ids: &[Uuid]) -> Result<HydratedCart, ApiError> {
        let mut facts: Vec<CourseFacts> = Vec::with_capacity(course_ids.len());
        for &course_id in course_ids {
            match self.catalog.get_course(course_id).await {
                Ok(course) => facts.push(course),
                Err(ApiError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        let total_units: i32 = facts.iter().map(|c| c.units).sum();
        let conflicts = detect_conflicts(&facts);

        let mut missing_prerequisites = Vec::new();
        for course in &facts {
            let check = self.catalog.check_prerequisites(student_id, course.id).await?;
            missing_prerequisites.extend(
                check
                    .prerequisites
                    .into_iter()
                    .filter(|p: &PrerequisiteEdge| !p.met)
                    .map(|p| MissingPrerequisite {
                        course_id: course.id,
                        missing_prereq_course_id: p.course_id,
                        missing_prereq_code: p.course_code,
                    }),
            );
        }

        let items = facts
            .into_iter()
            .map(|c| CartItemView {
                course_id: c.id,
                code: c.code,
                title: c.title,
                units: c.units,
                schedule: c.schedule,
                is_open: c.is_open,
            })
            .collect();

        Ok(HydratedCart {
            items,
            total_units,
            conflicts,
            missing_prerequisites,
        })
    }
}

/// Schedule-conflict detection over every unordered pair: courses with
/// unparseable schedules are skipped rather than treated as universally
/// conflicting.
fn detect_conflicts(courses: &[CourseFacts]) -> Vec<ConflictPair> {
    let parsed: Vec<(Uuid, Option<Schedule>)> = courses
        .iter()
        .map(|c| (c.id, Schedule::parse(&c.schedule).ok()))
        .collect();

    let mut conflicts = Vec::new();
    for i in 0..parsed.len() {
        for j in (i + 1)..parsed.len() {
            let (id_a, Some(sched_a)) = &parsed[i] else {
                continue;
            };
            let (id_b, Some(sched_b)) = &parsed[j] else {
                continue;
            };
            if sched_a.conflicts_with(sched_b) {
                conflicts.push(ConflictPair {
                    course_a: *id_a,
                    course_b: *id_b,
                });
            }
        }
    }
    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(id: Uuid, schedule: &str, units: i32) -> CourseFacts {
        CourseFacts {
            id,
            code: "CS-101".into(),
            title: "Intro".into(),
            units,
            schedule: schedule.into(),
            is_open: true,
        }
    }

    #[test]
    fn test_overlapping_schedules_detected_as_conflict() {
        let a = fact(Uuid::new_v4(), "MWF 09:00-10:00", 3);
        let b = fact(Uuid::new_v4(), "MW 09:30-10:30", 3);
        let conflicts = detect_conflicts(&[a, b]);
        assert_eq!(conflicts.len(), 1);
    }

    #[test]
    fn test_disjoint_schedules_do_not_conflict() {
        let a = fact(Uuid::new_v4(), "TTH 09:00-10:00", 3);
        let b = fact(Uuid::new_v4(), "MWF 09:00-10:00", 3);
        assert!(detect_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn test_malformed_schedule_is_skipped_not_fatal() {
        let a = fact(Uuid::new_v4(), "garbage", 3);
        let b = fact(Uuid::new_v4(), "MWF 09:00-10:00", 3);
        assert!(detect_conflicts(&[a, b]).is_empty());
    }

    #[test]
    fn test_hydrated_cart_reports_conflicts_present() {
        let cart = HydratedCart {
            items: Vec::new(),
            total_units: 0,
            conflicts: vec![ConflictPair {
                course_a: Uuid::new_v4(),
                course_b: Uuid::new_v4(),
            }],
            missing_prerequisites: Vec::new(),
        };
        assert!(cart.has_conflicts());
    }
}
