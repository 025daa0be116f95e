//! HTTP request/response shapes for the admin API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Course, RoleProfile, User};
use crate::service::course_service::CourseUpdate;
use crate::service::user_service::{CreatedUser, NewAdmin, NewFaculty, NewStudent, NewUser};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub is_active: bool,
    pub profile: RoleProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            is_active: u.is_active,
            profile: u.profile,
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum CreateUserRequest {
    Student {
        #[validate(email)]
        email: String,
        full_name: String,
        student_id: String,
        major: Option<String>,
        year_level: Option<i32>,
    },
    Faculty {
        #[validate(email)]
        email: String,
        full_name: String,
        faculty_id: String,
        department: Option<String>,
    },
    Admin {
        #[validate(email)]
        email: String,
        full_name: String,
    },
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        match req {
            CreateUserRequest::Student {
                email,
                full_name,
                student_id,
                major,
                year_level,
            } => NewUser::Student(NewStudent {
                email,
                full_name,
                student_id,
                major,
                year_level,
            }),
            CreateUserRequest::Faculty {
                email,
                full_name,
                faculty_id,
                department,
            } => NewUser::Faculty(NewFaculty {
                email,
                full_name,
                faculty_id,
                department,
            }),
            CreateUserRequest::Admin { email, full_name } => {
                NewUser::Admin(NewAdmin { email, full_name })
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserResponse {
    pub user: UserDto,
    pub temporary_password: String,
}

impl From<CreatedUser> for CreateUserResponse {
    fn from(c: CreatedUser) -> Self {
        Self {
            user: UserDto::from(c.user),
            temporary_password: c.temporary_password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleUserStatusRequest {
    pub is_active: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordResponse {
    pub temporary_password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDto {
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

impl From<Course> for CourseDto {
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

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCourseRequest {
    pub title: String,
    #[validate(range(min = 5, max = 100))]
    pub capacity: i32,
    pub schedule: String,
    pub is_open: bool,
    pub room: Option<String>,
}

impl From<UpdateCourseRequest> for CourseUpdate {
    fn from(req: UpdateCourseRequest) -> Self {
        Self {
            title: req.title,
            capacity: req.capacity,
            schedule: req.schedule,
            is_open: req.is_open,
            room: req.room,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetConfigRequest {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleEnrollmentRequest {
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetEnrollmentPeriodRequest {
    pub opens_at: String,
    pub closes_at: String,
}
