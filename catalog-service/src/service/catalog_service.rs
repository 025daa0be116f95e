//! # Catalog Service
//!
//! Implements the four read-only RPCs: `ListCourses`,
//! `GetCourse`, `GetCourseAvailability`, `CheckPrerequisites`.

use shared::errors::ApiError;
use tracing::instrument;
use uuid::Uuid;

use crate::clients::GradeClient;
use crate::domain::entities::Course;
use crate::repository::course_repository::{CourseFilter, CourseRepository};
use crate::repository::PrerequisiteRepository;

pub struct CatalogService {
    courses: CourseRepository,
    prerequisites: PrerequisiteRepository,
    grade_client: GradeClient,
}

/// `GetCourseAvailability` response: a hint, not a reservation.
#[derive(Debug, Clone)]
pub struct CourseAvailability {
    pub capacity: i32,
    pub enrolled: i32,
    pub seats_remaining: i32,
    pub is_open: bool,
    pub available: bool,
}

/// One edge in a `CheckPrerequisites` result.
#[derive(Debug, Clone)]
pub struct PrerequisiteStatus {
    pub course_id: Uuid,
    pub course_code: String,
    pub met: bool,
}

#[derive(Debug, Clone)]
pub struct PrerequisiteCheck {
    pub all_met: bool,
    pub prerequisites: Vec<PrerequisiteStatus>,
}

impl CatalogService {
    pub fn new(
        courses: CourseRepository,
        prerequisites: PrerequisiteRepository,
        grade_client: GradeClient,
    ) -> Self {
        Self {
            courses,
            prerequisites,
            grade_client,
        }
    }

    /// Lists courses matching `filter`. Malformed filter values
    /// should already have been coerced to "no filter" by the caller.
    #[instrument(skip(self, filter))]
    pub async fn list_courses(
        &self,
        filter: CourseFilter,
    ) -> Result<(Vec<Course>, i64), ApiError> {
        self.courses.list(&filter).await
    }

    #[instrument(skip(self), fields(course_id = %id))]
    pub async fn get_course(&self, id: Uuid) -> Result<Course, ApiError> {
        self.courses
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound {
                resource: format!("course:{id}"),
            })
    }

    /// Returns the seat-availability hint for a course.
    ///
    /// This is explicitly **not** a reservation: by the time a caller acts
    /// on it, `EnrollAll`'s in-transaction re-read may see a different
    /// `enrolled` value.
    #[instrument(skip(self), fields(course_id = %id))]
    pub async fn get_course_availability(&self, id: Uuid) -> Result<CourseAvailability, ApiError> {
        let course = self.get_course(id).await?;
        Ok(CourseAvailability {
            capacity: course.capacity,
            enrolled: course.enrolled,
            seats_remaining: course.seats_remaining(),
            is_open: course.is_open,
            available: course.is_available(),
        })
    }

    /// Resolves whether `student_id` satisfies every prerequisite of
    /// `course_id`. A course with no prerequisites trivially satisfies
    /// this check.
    #[instrument(skip(self), fields(student_id = %student_id, course_id = %course_id))]
    pub async fn check_prerequisites(
        &self,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<PrerequisiteCheck, ApiError> {
        let edges = self.prerequisites.find_for_course(course_id).await?;

        if edges.is_empty() {
            return Ok(PrerequisiteCheck {
                all_met: true,
                prerequisites: Vec::new(),
            });
        }

        let prereq_ids: Vec<Uuid> = edges.iter().map(|e| e.prereq_course_id).collect();
        let prereq_courses = self.courses.find_by_ids(&prereq_ids).await?;
        let passing = self
            .grade_client
            .passing_course_ids(student_id, &prereq_ids)
            .await?;

        let prerequisites: Vec<PrerequisiteStatus> = prereq_courses
            .into_iter()
            .map(|c| PrerequisiteStatus {
                met: passing.contains(&c.id),
                course_id: c.id,
                course_code: c.code,
            })
            .collect();

        let all_met = prerequisites.iter().all(|p| p.met);

        Ok(PrerequisiteCheck {
            all_met,
            prerequisites,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_matches_course_helpers() {
        let avail = CourseAvailability {
            capacity: 10,
            enrolled: 10,
            seats_remaining: 0,
            is_open: true,
            available: false,
        };
        assert!(!avail.available);
    }

    #[test]
    fn test_prerequisite_check_trivially_met_without_edges() {
        let check = PrerequisiteCheck {
            all_met: true,
            prerequisites: Vec::new(),
        };
        assert!(check.all_met);
        assert!(check.prerequisites.is_empty());
    }
}
