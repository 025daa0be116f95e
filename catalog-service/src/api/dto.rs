//! HTTP request/response shapes for the catalog API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::Course;
use crate::repository::course_repository::CourseFilter;
use crate::service::catalog_service::{CourseAvailability, PrerequisiteCheck};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub units: i32,
    pub capacity: i32,
    pub enrolled: i32,
    pub seats_remaining: i32,
    pub schedule: String,
    pub faculty_id: Option<Uuid>,
    pub is_open: bool,
    pub semester: String,
    pub room: Option<String>,
}

impl From<Course> for CourseDto {
    fn from(c: Course) -> Self {
        let seats_remaining = c.seats_remaining();
        Self {
            id: c.id,
            code: c.code,
            title: c.title,
            units: c.units,
            capacity: c.capacity,
            enrolled: c.enrolled,
            seats_remaining,
            schedule: c.schedule,
            faculty_id: c.faculty_id,
            is_open: c.is_open,
            semester: c.semester,
            room: c.room,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ListCoursesQuery {
    pub department: Option<String>,
    pub search: Option<String>,
    #[serde(default)]
    pub open_only: bool,
    pub semester: Option<String>,
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

impl From<ListCoursesQuery> for CourseFilter {
    fn from(q: ListCoursesQuery) -> Self {
        CourseFilter {
            department_prefix: q.department,
            search: q.search,
            open_only: q.open_only,
            semester: q.semester,
            limit: q.limit,
            offset: q.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCoursesResponse {
    pub courses: Vec<CourseDto>,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseAvailabilityDto {
    pub capacity: i32,
    pub enrolled: i32,
    pub seats_remaining: i32,
    pub is_open: bool,
    pub available: bool,
}

impl From<CourseAvailability> for CourseAvailabilityDto {
    fn from(a: CourseAvailability) -> Self {
        Self {
            capacity: a.capacity,
            enrolled: a.enrolled,
            seats_remaining: a.seats_remaining,
            is_open: a.is_open,
            available: a.available,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckPrerequisitesQuery {
    /// Admin/faculty override of the subject student; students may only
    /// check their own prerequisites.
    pub student_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteEdgeDto {
    pub course_id: Uuid,
    pub course_code: String,
    pub met: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckPrerequisitesResponse {
    pub all_met: bool,
    pub prerequisites: Vec<PrerequisiteEdgeDto>,
}

impl From<PrerequisiteCheck> for CheckPrerequisitesResponse {
    fn from(check: PrerequisiteCheck) -> Self {
        Self {
            all_met: check.all_met,
            prerequisites: check
                .prerequisites
                .into_iter()
                .map(|p| PrerequisiteEdgeDto {
                    course_id: p.course_id,
                    course_code: p.course_code,
                    met: p.met,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Internal surface: plain snake_case shapes for service-to-service callers
// (`grade-service`, `enrollment-service`). Deliberately kept separate from
// the camelCase DTOs above, which exist for the gateway-facing API.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct InternalCourseDto {
    pub id: Uuid,
    pub code: String,
    pub title: String,
    pub units: i32,
    pub capacity: i32,
    pub enrolled: i32,
    pub schedule: String,
    pub faculty_id: Option<Uuid>,
    pub is_open: bool,
    pub semester: String,
    pub room: Option<String>,
}

impl From<Course> for InternalCourseDto {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            code: c.code,
            title: c.title,
            units: c.units,
            capacity: c.capacity,
            enrolled: c.enrolled,
            schedule: c.schedule,
            faculty_id: c.faculty_id,
            is_open: c.is_open,
            semester: c.semester,
            room: c.room,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InternalAvailabilityDto {
    pub capacity: i32,
    pub enrolled: i32,
    pub seats_remaining: i32,
    pub is_open: bool,
    pub available: bool,
}

impl From<CourseAvailability> for InternalAvailabilityDto {
    fn from(a: CourseAvailability) -> Self {
        Self {
            capacity: a.capacity,
            enrolled: a.enrolled,
            seats_remaining: a.seats_remaining,
            is_open: a.is_open,
            available: a.available,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InternalPrerequisiteEdgeDto {
    pub course_id: Uuid,
    pub course_code: String,
    pub met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct InternalCheckPrerequisitesResponse {
    pub all_met: bool,
    pub prerequisites: Vec<InternalPrerequisiteEdgeDto>,
}

impl From<PrerequisiteCheck> for InternalCheckPrerequisitesResponse {
    fn from(check: PrerequisiteCheck) -> Self {
        Self {
            all_met: check.all_met,
            prerequisites: check
                .prerequisites
                .into_iter()
                .map(|p| InternalPrerequisiteEdgeDto {
                    course_id: p.course_id,
                    course_code: p.course_code,
                    met: p.met,
                })
                .collect(),
        }
    }
}
